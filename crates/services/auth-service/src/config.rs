//! Auth service configuration.

use std::env;
use std::net::SocketAddr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use thiserror::Error;

use common::{Environment, ParseEnvironmentError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 44044;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error(transparent)]
    Environment(#[from] ParseEnvironmentError),
}

/// Auth service configuration.
#[derive(Clone)]
pub struct AuthServiceConfig {
    /// Deployment environment (local, dev, prod)
    pub env: Environment,
    /// Database connection URL
    pub database_url: String,
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Per-request deadline enforced by the gRPC server
    pub timeout: StdDuration,
}

impl std::fmt::Debug for AuthServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceConfig")
            .field("env", &self.env)
            .field("database_url", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));

        let env = first(&["AUTH_SERVICE_ENV", "APP_ENV"])
            .map(|v| v.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let database_url = first(&["AUTH_SERVICE_DATABASE_URL", "DATABASE_URL"])
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let ttl_name = "AUTH_SERVICE_TOKEN_TTL_SECS";
        let ttl_raw = first(&[ttl_name, "TOKEN_TTL_SECS"]).ok_or(ConfigError::Missing(ttl_name))?;
        let token_ttl = ttl_raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds);
        let token_ttl = match token_ttl {
            Some(ttl) => ttl,
            None => {
                return Err(ConfigError::Invalid {
                    name: ttl_name,
                    value: ttl_raw,
                })
            }
        };

        let host = first(&["AUTH_SERVICE_HOST"]).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match first(&["AUTH_SERVICE_PORT"]) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "AUTH_SERVICE_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        // A zero deadline would cut off every request
        let timeout_secs = match first(&["AUTH_SERVICE_TIMEOUT_SECS"]) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "AUTH_SERVICE_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            env,
            database_url,
            token_ttl,
            host,
            port,
            timeout: StdDuration::from_secs(timeout_secs),
        })
    }

    /// Get the socket address to bind.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "AUTH_SERVICE_HOST",
            value: raw,
        })
    }
}
