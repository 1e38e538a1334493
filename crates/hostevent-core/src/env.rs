//! Environment variable helpers
//!
//! ```ignore
//! use hostevent_core::env::{env_get, env_get_bool};
//!
//! let rounds: usize = env_get("HEV_ROUNDS", 10_000);
//! let flush = env_get_bool("HEV_FLUSH_EPRINT", false);
//! ```

use std::str::FromStr;

/// Get environment variable parsed as `T`, or `default` if unset or unparsable
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Get environment variable as optional value
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Boolean variable: "1", "true", "yes", "on" (any case) are true.
/// Anything else that is set is false; unset returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
