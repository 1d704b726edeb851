//! Service configuration
//!
//! The listening port is the only setting read from the environment; the
//! remaining fields carry the service defaults and exist so tests and
//! embedders can point the classifier at a different fact service.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{ClassifierError, ErrorCode, Result};
use crate::facts::{DEFAULT_BASE_URL, DEFAULT_FACT_TIMEOUT};
use crate::response::FallbackPolicy;

pub const DEFAULT_PORT: u16 = 3000;

pub const PORT_ENV_VAR: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub fact_base_url: String,
    pub fact_timeout: Duration,
    pub fallback_policy: FallbackPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fact_base_url: DEFAULT_BASE_URL.to_string(),
            fact_timeout: DEFAULT_FACT_TIMEOUT,
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using a custom variable lookup
    ///
    /// An unset or empty `PORT` falls back to the default.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PORT_ENV_VAR).filter(|value| !value.trim().is_empty()) {
            config.port = parse_port(&raw)?;
        }

        Ok(config)
    }

    /// Address the server listens on (all interfaces)
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim().parse::<u16>().map_err(|e| {
        ClassifierError::config_with_code(
            ErrorCode::CONFIG_INVALID_PORT,
            format!("{PORT_ENV_VAR} must be a port number, got '{raw}'"),
        )
        .with_source(e)
    })
}
