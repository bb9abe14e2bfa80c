//! Environment variable helpers for service configuration.
//!
//! Services build their config structs from these at startup; a missing
//! required variable is a deployment defect, so it panics with the name.

use std::str::FromStr;

/// Read a required variable.
///
/// # Panics
///
/// Panics if the variable is unset or not valid unicode.
pub fn required(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("missing required env var {key}"))
}

/// Read an optional variable, falling back to `default` when it is unset.
pub fn or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read and parse an optional variable. Unset or unparsable values fall back
/// to `default`.
pub fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
