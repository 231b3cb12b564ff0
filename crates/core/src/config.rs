//! Helpers for reading configuration from environment-style lookups.
//!
//! Config structs take a `lookup` closure instead of reading
//! `std::env` directly so tests can feed them a plain map.

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Read `var`, falling back to `default` when unset or blank.
pub fn var_or<F>(lookup: &F, var: &'static str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse `var`, falling back to `default` when unset or blank.
pub fn parse_var_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var).map(|v| v.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw,
            reason: e.to_string(),
        }),
        _ => Ok(default),
    }
}
