use super::error::*;

use {serde_json::Value, std::result::Result};

/// Parse a human-readable duration, e.g. "1m" or "1d", into whole seconds.
///
/// Parsing is delegated to [duration-str](https://github.com/baoyachi/duration-str). Sub-second
/// remainders are truncated.
///
/// Returns [None] if the string is not a duration.
pub fn parse_delta_seconds(delta: &str) -> Option<u64> {
    duration_str::parse(delta).ok().map(|duration| duration.as_secs())
}

// Seconds for a delta directive value (integer or duration string).
pub(crate) fn delta_seconds(
    value: &Value,
    directive: &'static str,
) -> Result<u64, CacheControlError> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| CacheControlError::invalid_delta(number, directive)),

        Value::String(delta) => parse_delta_seconds(delta)
            .ok_or_else(|| CacheControlError::invalid_delta(delta, directive)),

        _ => Err(CacheControlError::invalid_delta(value, directive)),
    }
}
