//! Environment-driven configuration for the toggle server.
//!
//! | Variable | Default |
//! |---|---|
//! | `DEVFLOW_ADDR` | `0.0.0.0:3000` |
//! | `DEVFLOW_MAX_WRITE_ATTEMPTS` | `3` |
//! | `DEVFLOW_SEED_PATH` | unset |
//!
//! Unparseable values fall back to the default with a warning.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::toggle::DEFAULT_MAX_WRITE_ATTEMPTS;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket address the HTTP transport binds to.
    pub addr: String,
    /// Read/commit rounds per toggle before reporting a store error.
    pub max_write_attempts: u32,
    /// JSON file of targets to register at startup.
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS,
            seed_path: None,
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: lookup("DEVFLOW_ADDR").unwrap_or(defaults.addr),
            max_write_attempts: try_load(
                &lookup,
                "DEVFLOW_MAX_WRITE_ATTEMPTS",
                defaults.max_write_attempts,
            )
            .max(1),
            seed_path: lookup("DEVFLOW_SEED_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn try_load<T: FromStr + Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T
where
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
    }
}
