use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "DAPP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/dapp.toml";
const ENV_PREFIX: &str = "DAPP";
const ENV_SEPARATOR: &str = "__";

/// Variable the rollup runtime sets for every dapp
pub const ROLLUP_SERVER_ENV_VAR: &str = "ROLLUP_HTTP_SERVER_URL";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables
/// 5. `ROLLUP_HTTP_SERVER_URL` (highest priority, server URL only)
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = load_from_sources(config_path)?;
    apply_rollup_server_url(&mut config, env::var(ROLLUP_SERVER_ENV_VAR).ok());

    Ok(config)
}

fn apply_rollup_server_url(config: &mut Config, server_url: Option<String>) {
    if let Some(server_url) = server_url {
        config.rollup.server_url = server_url;
    }
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // DAPP__ROLLUP__IDLE_BACKOFF -> rollup.idle_backoff
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorPolicy;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.rollup.request_timeout.as_duration(), Duration::from_secs(300));
        assert!(config.rollup.idle_backoff.is_zero());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[rollup]
server_url = "http://127.0.0.1:5004"
request_timeout = "30s"
idle_backoff = "100ms"
on_error = "halt"

[model]
path = "/opt/dapp/model.json"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.rollup.server_url, "http://127.0.0.1:5004");
        assert_eq!(config.rollup.request_timeout.as_duration(), Duration::from_secs(30));
        assert_eq!(config.rollup.idle_backoff.as_duration(), Duration::from_millis(100));
        assert_eq!(config.rollup.on_error, ErrorPolicy::Halt);
        assert_eq!(config.model.path, PathBuf::from("/opt/dapp/model.json"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(&config_path, "[rollup\nserver_url = ").unwrap();

        assert!(load_from_sources(config_path).is_err());
    }

    #[test]
    fn test_out_of_range_duration_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(&config_path, "[rollup]\nrequest_timeout = \"18446744073709551615h\"\n").unwrap();

        let err = load_from_sources(config_path).unwrap_err();
        assert!(err.to_string().contains("out of range"), "unexpected error: {err}");
    }

    // Environment overrides are applied through a plain value here to avoid
    // mutating the process environment from tests.
    #[test]
    fn test_rollup_server_url_override() {
        let mut config = Config::default();

        apply_rollup_server_url(&mut config, None);
        assert_eq!(config.rollup.server_url, "");

        apply_rollup_server_url(&mut config, Some("http://rollup:5004".to_string()));
        assert_eq!(config.rollup.server_url, "http://rollup:5004");
    }
}
