//! Time utilities for academic credentials.
//!
//! Issue dates are RFC 3339 strings in UTC; verification reports carry
//! Unix epoch microseconds.

use chrono::{SecondsFormat, Utc};

/// Return the current time as microseconds since Unix epoch.
pub fn now_micros() -> u64 {
    Utc::now().timestamp_micros().max(0) as u64
}

/// Return the current UTC time as an RFC 3339 string with microseconds.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
