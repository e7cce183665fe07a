//! Configuration management for the registry.
//!
//! Configuration is loaded from environment variables (and a `.env` file when
//! present) with sensible defaults.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum size of an uploaded metadata document (256 KiB).
pub const DEFAULT_MAX_METADATA_SIZE: usize = 256 * 1024;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Metadata import configuration.
    pub metadata: MetadataConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connect_timeout_secs: u64,
    /// Seconds an idle connection is kept; `0` keeps it indefinitely.
    pub idle_timeout_secs: u64,
    /// Seconds before a connection is recycled; `0` disables recycling.
    pub max_lifetime_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/saml_sp".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

/// Metadata import configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Largest accepted metadata document, in bytes.
    pub max_document_size: usize,
    /// Reject metadata documents that carry no signature.
    pub require_signed: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_METADATA_SIZE,
            require_signed: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive (e.g. `info,sp_manager=debug`).
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// ## Errors
    ///
    /// Returns an error if `DATABASE_URL` is unset or a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through the given variable lookup.
    ///
    /// ## Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let url = lookup("DATABASE_URL").ok_or(Error::MissingSetting("DATABASE_URL"))?;

        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "SP_DB_MAX_CONNECTIONS", defaults.database.max_connections)?,
            min_connections: parse_or(&lookup, "SP_DB_MIN_CONNECTIONS", defaults.database.min_connections)?,
            connect_timeout_secs: parse_or(
                &lookup,
                "SP_DB_CONNECT_TIMEOUT",
                defaults.database.connect_timeout_secs,
            )?,
            idle_timeout_secs: parse_or(
                &lookup,
                "SP_DB_IDLE_TIMEOUT",
                defaults.database.idle_timeout_secs,
            )?,
            max_lifetime_secs: parse_or(
                &lookup,
                "SP_DB_MAX_LIFETIME",
                defaults.database.max_lifetime_secs,
            )?,
        };

        let metadata = MetadataConfig {
            max_document_size: parse_or(
                &lookup,
                "SP_METADATA_MAX_SIZE",
                defaults.metadata.max_document_size,
            )?,
            require_signed: parse_or(
                &lookup,
                "SP_METADATA_REQUIRE_SIGNED",
                defaults.metadata.require_signed,
            )?,
        };

        let log = LogConfig {
            filter: lookup("RUST_LOG").unwrap_or(defaults.log.filter),
        };

        Ok(Self {
            database,
            metadata,
            log,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidSetting { key, value }),
        None => Ok(default),
    }
}
