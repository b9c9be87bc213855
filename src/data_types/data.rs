use serde::{Deserialize, Serialize};

/// Anything positioned on the time axis in integer milliseconds.
pub trait Timestamped {
    fn time_ms(&self) -> i64;
}

/// A single funding quote as delivered by a venue feed.
///
/// `rate` is a fraction of notional for the venue's own settlement period.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub time: i64,
    pub rate: f64,
}

impl RawSample {
    pub fn new(time: i64, rate: f64) -> Self {
        Self { time, rate }
    }
}

impl Timestamped for RawSample {
    fn time_ms(&self) -> i64 {
        self.time
    }
}

/// One hour bucket of the joined series. Values are hourly-normalized percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub time: i64,
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
    pub spread: Option<f64>,
}

impl AlignedPoint {
    /// Builds a point, deriving `spread` only when both sides are present.
    pub fn new(time: i64, primary: Option<f64>, secondary: Option<f64>) -> Self {
        let spread = match (primary, secondary) {
            (Some(p), Some(s)) => Some(s - p),
            _ => None,
        };
        Self {
            time,
            primary,
            secondary,
            spread,
        }
    }

    pub fn value(&self, field: SeriesField) -> Option<f64> {
        match field {
            SeriesField::Primary => self.primary,
            SeriesField::Secondary => self.secondary,
            SeriesField::Spread => self.spread,
        }
    }
}

impl Timestamped for AlignedPoint {
    fn time_ms(&self) -> i64 {
        self.time
    }
}

/// Selects one of the value columns of an [`AlignedPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesField {
    Primary,
    Secondary,
    Spread,
}

/// Which input of the join a raw series feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesRole {
    /// Hourly backbone.
    Primary,
    /// Sparser series, forward-filled onto the backbone.
    Secondary,
}

impl std::fmt::Display for SeriesRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesRole::Primary => f.write_str("primary"),
            SeriesRole::Secondary => f.write_str("secondary"),
        }
    }
}
