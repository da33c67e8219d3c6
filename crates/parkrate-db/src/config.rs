//! Database configuration from the environment.
//!
//! | Variable                            | Default          |
//! |-------------------------------------|------------------|
//! | `PARKRATE_DB_PATH`                  | `./parkrate.db`  |
//! | `PARKRATE_DB_MAX_CONNECTIONS`       | `5`              |
//! | `PARKRATE_DB_CONNECT_TIMEOUT_SECS`  | `30`             |

use std::env;
use std::time::Duration;

use crate::pool::DbConfig;

pub const ENV_DB_PATH: &str = "PARKRATE_DB_PATH";
pub const ENV_MAX_CONNECTIONS: &str = "PARKRATE_DB_MAX_CONNECTIONS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "PARKRATE_DB_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_DB_PATH: &str = "./parkrate.db";

impl DbConfig {
    /// Loads configuration from `PARKRATE_DB_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let mut config = DbConfig::new(path);

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            let max: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()))?;
            if max == 0 {
                return Err(ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()));
            }
            let min = config.min_connections.min(max);
            config = config.max_connections(max).min_connections(min);
        }

        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_CONNECT_TIMEOUT_SECS.to_string()))?;
            config = config.connect_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
