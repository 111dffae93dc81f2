//! Environment-driven server settings.
//!
//! # Responsibility
//! - Resolve bind address, database path, and logging options from the
//!   process environment with sensible defaults.
//! - Reject malformed values at startup instead of at first use.
//!
//! Lookup is injected so parsing stays unit-testable without mutating the
//! process environment.

use std::path::PathBuf;

use todolite_core::{default_log_level, LogTarget};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DB_PATH: &str = "todolite.db";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// Recognized variables: `TODOLITE_ADDR`, `TODOLITE_PORT`,
    /// `TODOLITE_DB_PATH`, `TODOLITE_LOG_LEVEL`, `TODOLITE_LOG_DIR`.
    pub fn load() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// - Returns an error when `TODOLITE_ADDR` is set but blank.
    /// - Returns an error when `TODOLITE_PORT` is not a valid port number.
    /// - Returns an error when `TODOLITE_DB_PATH` or `TODOLITE_LOG_DIR` is
    ///   set but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = match lookup("TODOLITE_ADDR") {
            Some(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Err("TODOLITE_ADDR cannot be blank".to_string());
                }
                trimmed
            }
            None => DEFAULT_HOST.to_string(),
        };

        let port = match lookup("TODOLITE_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("TODOLITE_PORT must be a port number, got `{value}`"))?,
            None => DEFAULT_PORT,
        };

        let db_path = match lookup("TODOLITE_DB_PATH") {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err("TODOLITE_DB_PATH cannot be blank".to_string());
                }
                PathBuf::from(trimmed)
            }
            None => PathBuf::from(DEFAULT_DB_PATH),
        };

        let log_level = lookup("TODOLITE_LOG_LEVEL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match lookup("TODOLITE_LOG_DIR") {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err("TODOLITE_LOG_DIR cannot be blank".to_string());
                }
                Some(PathBuf::from(trimmed))
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Socket address string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logging destination derived from `log_dir`.
    pub fn log_target(&self) -> LogTarget {
        match &self.log_dir {
            Some(dir) => LogTarget::Dir(dir.clone()),
            None => LogTarget::Stderr,
        }
    }
}
