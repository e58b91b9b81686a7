//! Rollup worker
//!
//! Polls the rollup server through [`http::RollupClient`], hands each request
//! to its handler and reports the outcome on the next `/finish`.

pub mod http;
pub mod runner;

use std::time::Duration;

use crate::config::{ErrorPolicy, RollupConfig};

/// Runner configuration
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Sleep after an idle `/finish`. Zero polls again immediately.
    pub idle_backoff: Duration,
    pub on_error: ErrorPolicy,
}

impl From<&RollupConfig> for RunnerConfig {
    fn from(config: &RollupConfig) -> Self {
        Self {
            idle_backoff: config.idle_backoff.as_duration(),
            on_error: config.on_error,
        }
    }
}

impl From<&RollupConfig> for http::HttpConfig {
    fn from(config: &RollupConfig) -> Self {
        Self {
            request_timeout: config.request_timeout.as_duration(),
            ..Self::default()
        }
    }
}
