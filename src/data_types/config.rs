use serde::{Deserialize, Serialize};

use crate::utils::time::HOUR_MS;

/// Default lookback lengths offered to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookback {
    Day,
    #[default]
    Week,
    Month,
    Custom { ms: i64 },
}

impl Lookback {
    /// A custom length outside chrono's `Duration` range reads as zero.
    pub fn duration(&self) -> chrono::Duration {
        match self {
            Lookback::Day => chrono::Duration::days(1),
            Lookback::Week => chrono::Duration::weeks(1),
            Lookback::Month => chrono::Duration::days(30),
            Lookback::Custom { ms } => {
                chrono::Duration::try_milliseconds(*ms).unwrap_or_else(chrono::Duration::zero)
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Lookback::Custom { ms } => *ms >= 0 && chrono::Duration::try_milliseconds(*ms).is_some(),
            _ => true,
        }
    }

    pub fn span_ms(&self) -> f64 {
        self.duration().num_milliseconds() as f64
    }
}

/// Multiplicative span factors. Below 1 zooms in, above 1 zooms out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomFactors {
    pub button_in: f64,
    pub button_out: f64,
    pub wheel_in: f64,
    pub wheel_out: f64,
}

impl Default for ZoomFactors {
    fn default() -> Self {
        Self {
            button_in: 0.75,
            button_out: 1.25,
            wheel_in: 0.82,
            wheel_out: 1.18,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Narrowest window the user can zoom to, in milliseconds.
    pub min_window_ms: f64,
    /// Span shown while no explicit window is set.
    pub lookback: Lookback,
    pub zoom: ZoomFactors,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_window_ms: 3.0 * HOUR_MS as f64,
            lookback: Lookback::default(),
            zoom: ZoomFactors::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub viewport: ViewportConfig,
    /// Settlement period assumed when the secondary venue reports none.
    pub fallback_period_hours: f64,
    pub cache_capacity: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            fallback_period_hours: 8.0,
            cache_capacity: 32,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> eyre::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if !(config.viewport.min_window_ms.is_finite() && config.viewport.min_window_ms >= 0.0) {
            eyre::bail!(
                "min_window_ms must be a non-negative number, got {}",
                config.viewport.min_window_ms
            );
        }
        if !config.viewport.lookback.is_valid() {
            eyre::bail!(
                "lookback must be a non-negative duration, got {:?}",
                config.viewport.lookback
            );
        }
        Ok(config)
    }
}
