use serde::{Deserialize, Serialize};

use crate::utils::time::format_utc;

/// Inclusive time extent of an aligned series, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min: i64,
    pub max: i64,
}

impl TimeBounds {
    /// Orders the two ends so that `min <= max`.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Width in milliseconds. Computed in `f64` so extreme bounds cannot
    /// overflow.
    pub fn span(&self) -> f64 {
        self.max as f64 - self.min as f64
    }

    pub fn is_instant(&self) -> bool {
        self.min == self.max
    }

    pub fn full_window(&self) -> TimeWindow {
        TimeWindow {
            start: self.min as f64,
            end: self.max as f64,
        }
    }

    pub fn contains(&self, window: &TimeWindow) -> bool {
        window.start >= self.min as f64 && window.end <= self.max as f64
    }
}

/// Visible `[start, end]` sub-range of the time axis.
///
/// Kept in `f64` so focal zooms do not accumulate rounding drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Absolute time at `ratio` of the window (0 = start, 1 = end).
    pub fn time_at(&self, ratio: f64) -> f64 {
        self.start + self.span() * ratio
    }

    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} .. {}]",
            format_utc(self.start as i64),
            format_utc(self.end as i64)
        )
    }
}

/// Sample indices a range-selector widget should highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushRange {
    pub start_index: usize,
    pub end_index: usize,
}
