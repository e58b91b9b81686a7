use super::models::Config;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

const MAX_IDLE_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid rollup server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Unsupported rollup server URL scheme '{scheme}', expected 'http://' or 'https://'")]
    UnsupportedScheme { scheme: String },

    #[error("Request timeout must be positive")]
    ZeroRequestTimeout,

    #[error("Idle backoff {actual:?} exceeds limit of {limit:?}")]
    IdleBackoffTooLong { actual: Duration, limit: Duration },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server_url(config)?;
    validate_timings(config)?;
    Ok(())
}

/// An empty URL is accepted so the process can start outside a rollup
/// environment, but every request will fail.
fn validate_server_url(config: &Config) -> Result<(), ValidationError> {
    let server_url = config.rollup.server_url.trim();
    if server_url.is_empty() {
        tracing::warn!("Rollup server URL is empty, requests will fail until it is set");
        return Ok(());
    }

    let url = Url::parse(server_url).map_err(|e| ValidationError::InvalidServerUrl {
        url: server_url.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ValidationError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

fn validate_timings(config: &Config) -> Result<(), ValidationError> {
    if config.rollup.request_timeout.is_zero() {
        return Err(ValidationError::ZeroRequestTimeout);
    }

    let idle_backoff = config.rollup.idle_backoff.as_duration();
    if idle_backoff > MAX_IDLE_BACKOFF {
        return Err(ValidationError::IdleBackoffTooLong {
            actual: idle_backoff,
            limit: MAX_IDLE_BACKOFF,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::HumanDuration;

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.rollup.server_url = "http://127.0.0.1:5004".to_string();
        config
    }

    #[test]
    fn test_valid_config() {
        let config = create_test_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_server_url_is_allowed() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_unparseable_server_url() {
        let mut config = create_test_config();
        config.rollup.server_url = "not a url".to_string();

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidServerUrl { .. })
        ));
    }

    #[test]
    fn test_unsupported_scheme() {
        let mut config = create_test_config();
        config.rollup.server_url = "ftp://127.0.0.1:5004".to_string();

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_zero_request_timeout() {
        let mut config = create_test_config();
        config.rollup.request_timeout = HumanDuration::ZERO;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::ZeroRequestTimeout)));
    }

    #[test]
    fn test_idle_backoff_limit() {
        let mut config = create_test_config();
        config.rollup.idle_backoff = HumanDuration::from_secs(120);

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::IdleBackoffTooLong { .. })
        ));
    }
}
