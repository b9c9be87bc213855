use chrono::{TimeZone, Utc};

pub const HOUR_MS: i64 = 3_600_000;

/// Floors a millisecond timestamp to the start of its UTC hour.
///
/// Uses euclidean division so pre-epoch times still round down. `None` when
/// the hour start itself does not fit in an `i64`.
pub fn floor_to_hour(time_ms: i64) -> Option<i64> {
    time_ms.div_euclid(HOUR_MS).checked_mul(HOUR_MS)
}

/// Whether `time_ms` lies inside the range chrono can represent as a UTC
/// instant (roughly +/- 262,000 years).
pub fn is_representable(time_ms: i64) -> bool {
    Utc.timestamp_millis_opt(time_ms).single().is_some()
}

/// Renders a millisecond timestamp as `YYYY-MM-DD HH:MM` UTC for log output.
pub fn format_utc(time_ms: i64) -> String {
    match Utc.timestamp_millis_opt(time_ms) {
        chrono::LocalResult::Single(d) => d.format("%Y-%m-%d %H:%M").to_string(),
        chrono::LocalResult::Ambiguous(d, _) => d.format("%Y-%m-%d %H:%M").to_string(),
        chrono::LocalResult::None => format!("{}ms", time_ms),
    }
}
