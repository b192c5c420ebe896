//! Host configuration

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};

/// Host configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Address to bind the listener to
    pub bind_addr: String,

    /// Port to listen on
    pub port: u16,

    /// Handler invocation timeout in seconds
    pub handler_timeout_secs: u64,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl HostConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: var("EDGE_FUNCTION_BIND_ADDR").unwrap_or(defaults.bind_addr),

            port: var("EDGE_FUNCTION_PORT")
                .or_else(|| var("PORT"))
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),

            handler_timeout_secs: var("EDGE_FUNCTION_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.handler_timeout_secs),

            max_body_bytes: var("EDGE_FUNCTION_MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
        }
    }

    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }

    /// Resolve the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address {:?}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            handler_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}
