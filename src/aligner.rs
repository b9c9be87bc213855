//! Forward-fill join of two funding series sampled at different cadences.
//!
//! The primary (hourly) series is the time backbone. Each backbone hour
//! carries the most recent secondary quote at or before it, never a later one.

use thiserror::Error;
use tracing::{debug, warn};

use crate::data_types::{AlignedPoint, AlignedSeries, RawSample, SeriesRole};
use crate::utils::time::{floor_to_hour, is_representable};

/// Settlement period assumed for the secondary venue when none is reported.
pub const DEFAULT_PERIOD_HOURS: f64 = 8.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    /// Neither series holds a single usable sample.
    #[error("no funding data in either series")]
    NoData,

    /// The series was non-empty but every sample was malformed.
    #[error("all {count} {series} samples were malformed")]
    AllSamplesInvalid { series: SeriesRole, count: usize },
}

/// A raw series after bucketing, sorting, filtering and de-duplication.
#[derive(Debug, Clone, PartialEq)]
struct NormalizedSeries {
    samples: Vec<RawSample>,
    dropped: usize,
}

fn normalize(raw: &[RawSample]) -> NormalizedSeries {
    let mut keyed: Vec<(i64, i64, f64)> = raw
        .iter()
        .filter(|s| s.rate.is_finite() && is_representable(s.time))
        .filter_map(|s| floor_to_hour(s.time).map(|bucket| (bucket, s.time, s.rate)))
        .collect();
    let dropped = raw.len() - keyed.len();

    // Stable: for identical raw times the later input stays last.
    keyed.sort_by_key(|&(bucket, time, _)| (bucket, time));

    let mut samples: Vec<RawSample> = Vec::with_capacity(keyed.len());
    for (bucket, _, rate) in keyed {
        match samples.last_mut() {
            Some(last) if last.time == bucket => last.rate = rate,
            _ => samples.push(RawSample::new(bucket, rate)),
        }
    }

    NormalizedSeries { samples, dropped }
}

/// Merges a primary and a secondary funding series into hourly points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aligner {
    fallback_period_hours: f64,
}

impl Default for Aligner {
    fn default() -> Self {
        Self {
            fallback_period_hours: DEFAULT_PERIOD_HOURS,
        }
    }
}

impl Aligner {
    /// A non-positive or non-finite fallback is replaced by [`DEFAULT_PERIOD_HOURS`].
    pub fn new(fallback_period_hours: f64) -> Self {
        let fallback_period_hours = if fallback_period_hours.is_finite() && fallback_period_hours > 0.0 {
            fallback_period_hours
        } else {
            DEFAULT_PERIOD_HOURS
        };
        Self {
            fallback_period_hours,
        }
    }

    pub fn fallback_period_hours(&self) -> f64 {
        self.fallback_period_hours
    }

    /// Settlement period actually used for the secondary series.
    pub fn effective_period(&self, secondary_period_hours: Option<f64>) -> f64 {
        match secondary_period_hours {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => self.fallback_period_hours,
        }
    }

    /// Joins both series, O(n + m) after normalization.
    ///
    /// Inputs may be unsorted and contain duplicates or non-finite rates.
    pub fn merge(
        &self,
        primary: &[RawSample],
        secondary: &[RawSample],
        secondary_period_hours: Option<f64>,
    ) -> Result<AlignedSeries, AlignError> {
        let p = normalize(primary);
        let s = normalize(secondary);

        if p.samples.is_empty() && s.samples.is_empty() {
            return Err(AlignError::NoData);
        }
        for (role, raw, norm) in [
            (SeriesRole::Primary, primary, &p),
            (SeriesRole::Secondary, secondary, &s),
        ] {
            if norm.dropped > 0 {
                warn!(series = %role, dropped = norm.dropped, total = raw.len(), "dropped malformed funding samples");
            }
            if !raw.is_empty() && norm.samples.is_empty() {
                return Err(AlignError::AllSamplesInvalid {
                    series: role,
                    count: raw.len(),
                });
            }
        }

        let period = self.effective_period(secondary_period_hours);
        let to_hourly_secondary = |rate: f64| rate / period.max(1.0) * 100.0;

        let points = if p.samples.is_empty() {
            s.samples
                .iter()
                .map(|x| AlignedPoint::new(x.time, None, Some(to_hourly_secondary(x.rate))))
                .collect()
        } else {
            let mut points = Vec::with_capacity(p.samples.len());
            let mut cursor = 0;
            let mut carried: Option<f64> = None;
            for backbone in &p.samples {
                while let Some(next) = s.samples.get(cursor) {
                    if next.time > backbone.time {
                        break;
                    }
                    carried = Some(to_hourly_secondary(next.rate));
                    cursor += 1;
                }
                points.push(AlignedPoint::new(backbone.time, Some(backbone.rate * 100.0), carried));
            }
            points
        };

        debug!(
            primary = p.samples.len(),
            secondary = s.samples.len(),
            period_hours = period,
            points = points.len(),
            "aligned funding series"
        );

        Ok(AlignedSeries::from_sorted(points))
    }
}
