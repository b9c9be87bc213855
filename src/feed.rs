//! Typed boundary between venue payloads and the aligner.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data_types::RawSample;
use crate::utils::time::is_representable;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error from {venue}: {message}")]
    Transport { venue: String, message: String },

    #[error("malformed venue payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A newer query superseded this one before it completed.
    #[error("query generation {generation} superseded")]
    Stale { generation: u64 },
}

/// One venue's validated funding history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueSeries {
    pub samples: Vec<RawSample>,
    /// Settlement cycle the rates are quoted for, if the venue reports it.
    pub period_hours: Option<f64>,
}

impl VenueSeries {
    pub fn new(samples: Vec<RawSample>, period_hours: Option<f64>) -> Self {
        Self {
            samples,
            period_hours,
        }
    }
}

/// Venues quote rates either as JSON numbers or as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn to_f64(&self) -> Option<f64> {
        let v = match self {
            RateValue::Number(n) => *n,
            RateValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FeedRecord {
    #[serde(alias = "fundingTime")]
    time: f64,
    #[serde(alias = "fundingRate")]
    rate: RateValue,
}

/// Decodes a venue JSON array of `{time, rate}` records.
///
/// Records with an unparsable rate, or a time that is non-finite or outside
/// the representable UTC range, are skipped.
pub fn parse_feed(json: &str, period_hours: Option<f64>) -> Result<VenueSeries, FetchError> {
    let records: Vec<FeedRecord> = serde_json::from_str(json)?;
    let total = records.len();
    let samples: Vec<RawSample> = records
        .into_iter()
        .filter_map(|r| {
            let rate = r.rate.to_f64()?;
            // The cast saturates, so out-of-range times land outside chrono's range.
            let time = r.time.is_finite().then_some(r.time as i64)?;
            is_representable(time).then(|| RawSample::new(time, rate))
        })
        .collect();
    if samples.len() < total {
        debug!(skipped = total - samples.len(), total, "skipped unusable feed records");
    }
    Ok(VenueSeries::new(samples, period_hours))
}

/// Source of raw funding history for both venues of a query.
pub trait SeriesFetcher: Send + Sync {
    /// Hourly venue; its period is always one hour.
    fn fetch_primary(&self, symbol: &str, span_ms: i64) -> Result<VenueSeries, FetchError>;

    fn fetch_secondary(&self, symbol: &str, span_ms: i64) -> Result<VenueSeries, FetchError>;
}
