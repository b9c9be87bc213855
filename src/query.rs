use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aligner::Aligner;
use crate::cache::AlignedCache;
use crate::data_types::{AlignedSeries, ChartConfig, Lookback};
use crate::feed::{FetchError, SeriesFetcher, VenueSeries};

/// Identity of one aligned series.
///
/// Two queries with equal keys always produce the same series, which is
/// what makes them cacheable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryKey {
    pub symbol: String,
    pub secondary_symbol: String,
    /// Overrides the period reported by the secondary venue.
    pub secondary_period_hours: Option<f64>,
    pub lookback: Lookback,
}

impl QueryKey {
    pub fn new(symbol: impl Into<String>, secondary_symbol: impl Into<String>, lookback: Lookback) -> Self {
        Self {
            symbol: symbol.into(),
            secondary_symbol: secondary_symbol.into(),
            secondary_period_hours: None,
            lookback,
        }
    }

    pub fn with_period_hours(mut self, hours: f64) -> Self {
        self.secondary_period_hours = Some(hours);
        self
    }

    fn period_bits(&self) -> Option<u64> {
        self.secondary_period_hours.map(f64::to_bits)
    }
}

impl PartialEq for QueryKey {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.secondary_symbol == other.secondary_symbol
            && self.period_bits() == other.period_bits()
            && self.lookback == other.lookback
    }
}

impl Eq for QueryKey {}

impl Hash for QueryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.secondary_symbol.hash(state);
        self.period_bits().hash(state);
        self.lookback.hash(state);
    }
}

/// Proof that a query was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Generation counter; starting a query invalidates every older ticket.
#[derive(Debug, Default)]
pub struct QueryTracker {
    generation: AtomicU64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> QueryTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        QueryTicket { generation }
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        self.current() == ticket.generation
    }

    pub fn ensure_current(&self, ticket: &QueryTicket) -> Result<(), FetchError> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(FetchError::Stale {
                generation: ticket.generation,
            })
        }
    }
}

/// Fetches, aligns and caches funding series for chart queries.
pub struct FundingService<F: SeriesFetcher> {
    fetcher: F,
    aligner: Aligner,
    cache: AlignedCache,
    tracker: Arc<QueryTracker>,
}

impl<F: SeriesFetcher> FundingService<F> {
    pub fn new(fetcher: F, config: &ChartConfig) -> Self {
        Self::with_tracker(fetcher, config, Arc::new(QueryTracker::new()))
    }

    /// Shares a generation counter with the caller, e.g. so a UI can
    /// invalidate in-flight loads without holding the service.
    pub fn with_tracker(fetcher: F, config: &ChartConfig, tracker: Arc<QueryTracker>) -> Self {
        Self {
            fetcher,
            aligner: Aligner::new(config.fallback_period_hours),
            cache: AlignedCache::new(config.cache_capacity),
            tracker,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &AlignedCache {
        &self.cache
    }

    pub fn tracker(&self) -> &QueryTracker {
        &self.tracker
    }

    /// Loads the aligned series for `key`.
    ///
    /// Returns `Ok(None)` when a newer query started while this one was
    /// fetching; that result is discarded and not cached.
    pub fn load(&self, key: &QueryKey) -> eyre::Result<Option<Arc<AlignedSeries>>> {
        let ticket = self.tracker.begin();
        if let Some(hit) = self.cache.get(key) {
            return Ok(Some(hit));
        }

        let (primary, secondary) = match self.fetch_both(key, &ticket) {
            Ok(pair) => pair,
            Err(FetchError::Stale { generation }) => {
                debug!(generation, current = self.tracker.current(), symbol = %key.symbol, "discarding stale funding query");
                return Ok(None);
            }
            Err(e) => {
                return Err(eyre::Report::new(e)
                    .wrap_err(format!("failed to fetch funding history for {}", key.symbol)));
            }
        };

        let period = key.secondary_period_hours.or(secondary.period_hours);
        let series = self
            .aligner
            .merge(&primary.samples, &secondary.samples, period)
            .wrap_err_with(|| {
                format!(
                    "failed to align {} against {}",
                    key.symbol, key.secondary_symbol
                )
            })?;

        let series = Arc::new(series);
        self.cache.insert(key.clone(), series.clone());
        Ok(Some(series))
    }

    fn fetch_both(&self, key: &QueryKey, ticket: &QueryTicket) -> Result<(VenueSeries, VenueSeries), FetchError> {
        let span_ms = key.lookback.duration().num_milliseconds();
        let primary = self.fetcher.fetch_primary(&key.symbol, span_ms)?;
        self.tracker.ensure_current(ticket)?;
        let secondary = self.fetcher.fetch_secondary(&key.secondary_symbol, span_ms)?;
        self.tracker.ensure_current(ticket)?;
        Ok((primary, secondary))
    }
}
