use std::time::Duration;

use crate::error::ConfigError;

/// Non-empty, trimmed value of an environment variable.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_bool_var(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|raw| parse_bool(&raw))
}

/// Humantime duration (`"30s"`, `"1m 30s"`, `"250ms"`) from an env var.
pub fn parse_duration_var(name: &str) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(None);
    };
    humantime::parse_duration(&raw)
        .map(Some)
        .map_err(|err| ConfigError::invalid(name, raw, err))
}

/// Finite, non-negative float from an env var.
pub fn parse_f32_var(name: &str) -> Result<Option<f32>, ConfigError> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(None);
    };
    match raw.parse::<f32>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        Ok(_) => Err(ConfigError::invalid(name, raw, "must be a non-negative number")),
        Err(err) => Err(ConfigError::invalid(name, raw, err)),
    }
}
