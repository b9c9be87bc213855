use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::data_types::AlignedSeries;
use crate::query::QueryKey;

struct LruInner {
    entries: HashMap<QueryKey, Arc<AlignedSeries>>,
    /// Front is least recently used.
    order: VecDeque<QueryKey>,
}

impl LruInner {
    /// Moves `key` to the most recent end. O(capacity) scan.
    fn touch(&mut self, key: &QueryKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

/// Bounded LRU cache of aligned series keyed by query parameters.
pub struct AlignedCache {
    inner: Mutex<LruInner>,
    capacity: usize,
}

impl AlignedCache {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(LruInner {
                entries: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    /// Looks up a series and marks it most recently used.
    pub fn get(&self, key: &QueryKey) -> Option<Arc<AlignedSeries>> {
        let mut inner = self.inner.lock();
        let hit = inner.entries.get(key).cloned();
        if hit.is_some() {
            inner.touch(key);
            debug!(symbol = %key.symbol, "aligned cache hit");
        } else {
            debug!(symbol = %key.symbol, "aligned cache miss");
        }
        hit
    }

    /// Inserts or replaces an entry, evicting the least recently used one when full.
    pub fn insert(&self, key: QueryKey, series: Arc<AlignedSeries>) {
        let mut inner = self.inner.lock();
        if inner.entries.insert(key.clone(), series).is_some() {
            inner.touch(&key);
            return;
        }
        inner.order.push_back(key);
        while inner.order.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.entries.remove(&evicted);
                debug!(symbol = %evicted.symbol, "aligned cache eviction");
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}
