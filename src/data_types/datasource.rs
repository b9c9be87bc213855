use serde::{Deserialize, Serialize};

use super::axis::{TimeBounds, TimeWindow};
use super::data::{AlignedPoint, SeriesField};

/// Immutable, time-ordered output of the aligner.
///
/// Times are strictly increasing; every lookup relies on it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlignedSeries {
    points: Vec<AlignedPoint>,
}

impl AlignedSeries {
    pub(crate) fn from_sorted(points: Vec<AlignedPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].time < w[1].time));
        Self { points }
    }

    pub fn points(&self) -> &[AlignedPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&AlignedPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last timestamp, or `None` for an empty series.
    pub fn time_bounds(&self) -> Option<TimeBounds> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some(TimeBounds {
                min: first.time,
                max: last.time,
            }),
            _ => None,
        }
    }

    /// Points whose time falls inside `[start, end]`.
    pub fn iter_range(&self, start: f64, end: f64) -> impl Iterator<Item = &AlignedPoint> + '_ {
        let lo = self.points.partition_point(|p| (p.time as f64) < start);
        let hi = self.points.partition_point(|p| (p.time as f64) <= end);
        self.points[lo..hi.max(lo)].iter()
    }

    pub fn iter_window(&self, window: &TimeWindow) -> impl Iterator<Item = &AlignedPoint> + '_ {
        self.iter_range(window.start, window.end)
    }

    /// Min/max of one value column inside `[start, end]`, skipping gaps.
    pub fn value_range(&self, start: f64, end: f64, field: SeriesField) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut found = false;
        for v in self.iter_range(start, end).filter_map(|p| p.value(field)) {
            min = min.min(v);
            max = max.max(v);
            found = true;
        }

        if found {
            Some((min, max))
        } else {
            None
        }
    }
}
