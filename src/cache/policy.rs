use chrono::{DateTime, Duration, Utc};

/// Maximum age of a usable cache. Fixed 7x24h window rather than calendar-day
/// arithmetic, so validity never shifts across DST transitions.
const MAX_CACHE_AGE_DAYS: i64 = 7;

/// A cache saved at `timestamp` is valid when checked at `date` iff it is
/// strictly younger than seven days. Pure; the current instant is always
/// injected by the caller.
pub(crate) fn validate(timestamp: DateTime<Utc>, date: DateTime<Utc>) -> bool {
    date < timestamp + Duration::days(MAX_CACHE_AGE_DAYS)
}
