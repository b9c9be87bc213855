use serde::{Deserialize, Serialize};

use crate::data_types::Timestamped;

/// Which neighbour to pick when a target time falls between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// Greatest index whose time is `<= target`.
    Floor,
    /// Least index whose time is `>= target`.
    Ceil,
}

/// Binary search over a strictly increasing time array.
///
/// The result is always a valid index: targets before the first sample
/// map to `0`, targets past the last map to `len - 1`. Returns `None` only
/// for an empty slice.
pub fn nearest_index<T: Timestamped>(samples: &[T], target_ms: f64, mode: SnapMode) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }
    let last = samples.len() - 1;
    if target_ms.is_nan() {
        return Some(0);
    }

    let idx = match mode {
        SnapMode::Floor => {
            let after = samples.partition_point(|s| (s.time_ms() as f64) <= target_ms);
            after.saturating_sub(1)
        }
        SnapMode::Ceil => {
            let at = samples.partition_point(|s| (s.time_ms() as f64) < target_ms);
            at.min(last)
        }
    };
    Some(idx)
}
