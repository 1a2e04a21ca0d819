//! Server configuration.

use std::net::{AddrParseError, SocketAddr};

/// Environment variable overriding the listen address.
pub const BIND_ADDR_VAR: &str = "SUBWAY_BIND_ADDR";

/// Environment variable holding the log filter, as understood by
/// `tracing_subscriber::EnvFilter`.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} {value:?}: {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Log filter used when `RUST_LOG` is unset.
    pub default_log_filter: String,
}

impl ServerConfig {
    /// Defaults, overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR).filter(|v| !v.trim().is_empty()) {
            config.bind_addr =
                value
                    .trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidAddr {
                        var: BIND_ADDR_VAR,
                        value: value.clone(),
                        source,
                    })?;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            default_log_filter: "subway_server=info".to_string(),
        }
    }
}
