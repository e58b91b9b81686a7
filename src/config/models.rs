use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rollup: RollupConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

/// What the loop does with a request it could not handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Announce `reject` on the next `/finish` and keep polling
    #[default]
    Reject,
    /// Stop the loop and exit with the error
    Halt,
}

/// Rollup HTTP server connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RollupConfig {
    /// Base URL of the rollup HTTP server (e.g. `http://127.0.0.1:5004`)
    #[serde(default)]
    pub server_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: HumanDuration,
    /// Pause after a `202` before polling again. Zero keeps the tight loop.
    #[serde(default)]
    pub idle_backoff: HumanDuration,
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            request_timeout: default_request_timeout(),
            idle_backoff: HumanDuration::ZERO,
            on_error: ErrorPolicy::default(),
        }
    }
}

// `/finish` may be held open by the server until an input arrives
fn default_request_timeout() -> HumanDuration {
    HumanDuration::from_secs(300)
}

/// Model artifact location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("data/model.json")
}
