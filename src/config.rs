//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export DATABASE_PATH="url_database"
//! export URL_PREFIX="https://bajo"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address as `ip:port` (default: `0.0.0.0:8080`)
//! - `DATABASE_PATH` - sled database directory (default: `url_database`)
//! - `STORAGE_BACKEND` - `sled` or `memory` (default: `sled`)
//! - `URL_PREFIX` - Prefix of shortened URLs (default: `https://bajo`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_PATH: &str = "url_database";
pub const DEFAULT_URL_PREFIX: &str = "https://bajo";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Directory of the sled database. Ignored by the memory backend.
    pub database_path: String,
    /// `sled` (persistent) or `memory` (lost on exit).
    pub storage_backend: String,
    /// Prepended to keys to build shortened URLs, without trailing slash.
    pub url_prefix: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
        let storage_backend = env::var("STORAGE_BACKEND")
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_else(|_| "sled".to_string());
        let url_prefix = env::var("URL_PREFIX")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_URL_PREFIX.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            database_path,
            storage_backend,
            url_prefix,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not an `ip:port` socket address
    /// - `storage_backend` is not `sled` or `memory`
    /// - `database_path` is empty while the sled backend is selected
    /// - `url_prefix` is not an `http://` or `https://` URL
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "LISTEN must be a socket address like '0.0.0.0:8080', got '{}'",
                self.listen_addr
            );
        }

        if self.storage_backend != "sled" && self.storage_backend != "memory" {
            anyhow::bail!(
                "STORAGE_BACKEND must be 'sled' or 'memory', got '{}'",
                self.storage_backend
            );
        }

        if self.is_persistent() && self.database_path.trim().is_empty() {
            anyhow::bail!("DATABASE_PATH must not be empty");
        }

        if !self.url_prefix.starts_with("http://") && !self.url_prefix.starts_with("https://") {
            anyhow::bail!(
                "URL_PREFIX must start with 'http://' or 'https://', got '{}'",
                self.url_prefix
            );
        }

        Ok(())
    }

    /// Returns whether mappings survive a restart.
    pub fn is_persistent(&self) -> bool {
        self.storage_backend == "sled"
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        if self.is_persistent() {
            tracing::info!("  Storage: sled at {}", self.database_path);
        } else {
            tracing::info!("  Storage: memory (not persistent)");
        }
        tracing::info!("  URL prefix: {}", self.url_prefix);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
