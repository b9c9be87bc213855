use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::data_types::{AlignedPoint, AlignedSeries, BrushRange, Lookback, TimeWindow, ViewportConfig};
use crate::gestures::Gesture;
use crate::query::QueryKey;
use crate::view_controller::ViewportController;

/// What the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisibleFrame {
    pub window: TimeWindow,
    pub brush: BrushRange,
    pub points: Vec<AlignedPoint>,
}

/// One interactive chart: an aligned series plus the viewport over it.
///
/// The viewport is rebuilt whenever the series identity changes.
pub struct ChartSession {
    key: QueryKey,
    series: Arc<AlignedSeries>,
    viewport: ViewportController,
}

impl ChartSession {
    /// `None` when `series` is empty and therefore has no time extent.
    pub fn new(key: QueryKey, series: Arc<AlignedSeries>, config: ViewportConfig) -> Option<Self> {
        let config = ViewportConfig {
            lookback: key.lookback,
            ..config
        };
        let viewport = ViewportController::for_series(&series, config)?;
        Some(Self {
            key,
            series,
            viewport,
        })
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn series(&self) -> &Arc<AlignedSeries> {
        &self.series
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Swaps in a freshly loaded series.
    ///
    /// A different key resets the viewport; the same key (a refresh) keeps
    /// the user's window, re-clamped to the new extent. Empty series are ignored.
    pub fn replace(&mut self, key: QueryKey, series: Arc<AlignedSeries>) -> bool {
        let Some(bounds) = series.time_bounds() else {
            return false;
        };
        if key != self.key {
            debug!(from = %self.key.symbol, to = %key.symbol, "series identity changed, rebuilding viewport");
            let config = ViewportConfig {
                lookback: key.lookback,
                ..*self.viewport.config()
            };
            self.viewport = ViewportController::new(bounds, config);
        } else {
            self.viewport.rebound(bounds);
        }
        self.key = key;
        self.series = series;
        true
    }

    /// Shows `lookback` over the series already held and resets the viewport.
    ///
    /// The key is left alone because it still names the loaded history. To
    /// fetch a longer history, load a key with the new lookback and hand it
    /// to [`ChartSession::replace`], which treats it as a new identity.
    pub fn set_lookback(&mut self, lookback: Lookback) {
        self.viewport.set_lookback(lookback);
    }

    pub fn apply(&mut self, gesture: &Gesture) -> TimeWindow {
        self.viewport.apply(gesture, &self.series)
    }

    pub fn visible(&self) -> Option<VisibleFrame> {
        let window = self.viewport.domain();
        let brush = self.viewport.brush_state(&self.series)?;
        Some(VisibleFrame {
            window,
            brush,
            points: self.series.iter_window(&window).copied().collect(),
        })
    }
}
