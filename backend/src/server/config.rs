//! Environment-driven server configuration.
//!
//! The lookup seam lets tests exercise parsing without mutating process
//! environment variables.

use std::env;

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const BIND_ADDR_VAR: &str = "BIND_ADDR";
const POOL_MAX_SIZE_VAR: &str = "DATABASE_POOL_MAX_SIZE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration errors raised during startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable {name}")]
    MissingVar { name: String },
    /// An environment variable held an unparseable value.
    #[error("invalid value for {name}: {message}")]
    InvalidVar { name: String, message: String },
}

/// Runtime configuration for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub pool_max_size: u32,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or
    /// `DATABASE_POOL_MAX_SIZE` is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR).ok_or_else(|| ConfigError::MissingVar {
            name: DATABASE_URL_VAR.to_owned(),
        })?;

        let bind_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());

        let pool_max_size = match lookup(POOL_MAX_SIZE_VAR) {
            None => DEFAULT_POOL_MAX_SIZE,
            Some(raw) => raw.parse::<u32>().map_err(|err| ConfigError::InvalidVar {
                name: POOL_MAX_SIZE_VAR.to_owned(),
                message: err.to_string(),
            })?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_max_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_database_url_is_an_error() {
        let result = ServerConfig::from_lookup(|_| None);
        assert_eq!(
            result,
            Err(ConfigError::MissingVar {
                name: DATABASE_URL_VAR.to_owned()
            })
        );
    }

    #[rstest]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = ServerConfig::from_lookup(|name| {
            (name == DATABASE_URL_VAR).then(|| "postgres://localhost/patients".to_owned())
        })
        .expect("config parses");

        assert_eq!(config.database_url, "postgres://localhost/patients");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.pool_max_size, DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(|name| match name {
            DATABASE_URL_VAR => Some("postgres://db/patients".to_owned()),
            BIND_ADDR_VAR => Some("127.0.0.1:9090".to_owned()),
            POOL_MAX_SIZE_VAR => Some("4".to_owned()),
            _ => None,
        })
        .expect("config parses");

        assert_eq!(config.bind_addr, "127.0.0.1:9090");
        assert_eq!(config.pool_max_size, 4);
    }

    #[rstest]
    #[case("zero-ish")]
    #[case("-3")]
    fn unparseable_pool_size_is_an_error(#[case] raw: &str) {
        let raw = raw.to_owned();
        let result = ServerConfig::from_lookup(|name| match name {
            DATABASE_URL_VAR => Some("postgres://db/patients".to_owned()),
            POOL_MAX_SIZE_VAR => Some(raw.clone()),
            _ => None,
        });

        assert!(matches!(result, Err(ConfigError::InvalidVar { .. })));
    }
}
