//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::session::SessionConfig;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_EXPIRY_MINUTES: u64 = 30;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address '{value}': {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("{var} must be a whole number, got '{value}'")]
    NotANumber { var: &'static str, value: String },

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `GAME_EXPIRY_MINUTES` and `SWEEP_INTERVAL_SECS`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_value = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = addr_value.parse::<SocketAddr>().map_err(|source| ConfigError::Addr {
            value: addr_value.clone(),
            source,
        })?;

        let expiry_minutes = number(&lookup, "GAME_EXPIRY_MINUTES", DEFAULT_EXPIRY_MINUTES)?;
        let sweep_secs = number(&lookup, "SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;

        let config = ServerConfig {
            addr,
            session: SessionConfig {
                idle_timeout: Duration::from_secs(expiry_minutes * 60),
                sweep_interval: Duration::from_secs(sweep_secs),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.idle_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "GAME_EXPIRY_MINUTES must be > 0".into(),
            ));
        }
        if self.session.sweep_interval.is_zero() {
            return Err(ConfigError::Validation(
                "SWEEP_INTERVAL_SECS must be > 0".into(),
            ));
        }
        Ok(())
    }
}

fn number(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { var, value }),
    }
}
