//! Text/integer encodings for persisted timing fields.
//!
//! Timestamps are RFC 3339 in UTC with a fixed nine-digit fraction, so they
//! sort lexically and round-trip exactly. Durations are integer nanoseconds.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Sentinel stored for an absent `checked_at`
pub const NO_TIMESTAMP: &str = "";

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn format_optional_timestamp(instant: Option<DateTime<Utc>>) -> String {
    instant.map_or_else(|| NO_TIMESTAMP.to_string(), format_timestamp)
}

/// Parse an RFC 3339 timestamp (any offset) into UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `Some(None)` for the empty sentinel, `None` for anything unparseable
pub fn parse_optional_timestamp(text: &str) -> Option<Option<DateTime<Utc>>> {
    if text.trim().is_empty() {
        return Some(None);
    }
    parse_timestamp(text).map(Some)
}

/// `None` when the duration does not fit in an i64 nanosecond count
pub fn duration_to_nanos(duration: Duration) -> Option<i64> {
    duration.num_nanoseconds()
}

pub fn nanos_to_duration(nanos: i64) -> Duration {
    Duration::nanoseconds(nanos)
}
