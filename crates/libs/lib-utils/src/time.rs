//! # Time Utilities
//!
//! Utilities for timestamps using chrono.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Get current UTC time, truncated to microseconds.
///
/// Stored timestamps carry microsecond precision, so values taken from here
/// compare equal after a storage round-trip.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format time as RFC3339 string with microsecond precision.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}
