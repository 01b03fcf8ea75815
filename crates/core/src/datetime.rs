//! Fixed wire timestamp formats.
//!
//! Timestamp attributes travel as strings under one millisecond-precision
//! UTC pattern; generated key stamps use coarser calendar buckets. None of
//! these are locale-sensitive.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Wire pattern for timestamp attributes (ISO-8601, millisecond UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Pattern for month-bucketed key stamps.
pub const MONTH_FORMAT: &str = "%Y%m";

/// Pattern for day-bucketed key stamps.
pub const DAY_FORMAT: &str = "%Y%m%d";

/// Formats a timestamp under the fixed wire pattern.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a wire timestamp; any string outside the fixed pattern is rejected.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}
