//! Query service configuration.
//!
//! - `HOST`: bind IP address (default `0.0.0.0`)
//! - `PORT`: bind port (default `8080`)
//! - `CORS_ALLOWED_ORIGIN`: the single origin allowed by CORS
//!   (default `http://localhost:3000`)

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::{ConfigurationError, env_lookup, lookup_trimmed};

/// Host bound when `HOST` is not set.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port bound when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Origin allowed when `CORS_ALLOWED_ORIGIN` is not set.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address the listener binds to.
    pub address: SocketAddr,
    /// The only origin CORS admits.
    pub allowed_origin: HeaderValue,
}

impl ServiceConfig {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(&env_lookup)
    }

    /// Reads the settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `PORT` is not a port
    /// number, `HOST:PORT` is not a socket address, or the origin is not
    /// a valid header value.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let host = lookup_trimmed(lookup, "HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup_trimmed(lookup, "PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidValue { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let address = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|_| ConfigurationError::InvalidValue {
                name: "HOST",
                value: host,
            })?;

        let origin = lookup_trimmed(lookup, "CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(&origin).map_err(|_| ConfigurationError::InvalidValue {
                name: "CORS_ALLOWED_ORIGIN",
                value: origin,
            })?;

        Ok(Self {
            address,
            allowed_origin,
        })
    }
}
