//! Configuration management for the dapp
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//! 4. `ROLLUP_HTTP_SERVER_URL`, the variable the rollup runtime provides
//!
//! # Usage
//!
//! ```no_run
//! use sentiment_dapp::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Rollup server: {}", config.rollup.server_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `DAPP__<section>__<key>`
//!
//! Examples:
//! - `DAPP__ROLLUP__IDLE_BACKOFF=250ms`
//! - `DAPP__ROLLUP__ON_ERROR=halt`
//! - `DAPP__MODEL__PATH=/opt/dapp/model.json`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/dapp.toml`.
//! This can be overridden using the `DAPP_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{Config, ErrorPolicy, ModelConfig, RollupConfig};
pub use sources::ROLLUP_SERVER_ENV_VAR;
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (bad URL scheme, zero timeout, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
