//! HTTP client for the rollup server

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::rollup::{FinishRequest, FinishResponse, FinishStatus, Notice, Report, RollupRequest};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected HTTP {status} from {endpoint}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Transport to the rollup server
///
/// The poll loop and the handlers only talk to the server through this trait.
#[async_trait]
pub trait RollupClient: Send + Sync {
    /// Announce the last outcome and wait for the next request
    async fn finish(&self, status: FinishStatus) -> Result<FinishResponse>;

    /// Emit a notice, returning the HTTP status code
    async fn send_notice(&self, notice: &Notice) -> Result<u16>;

    /// Emit a report, returning the HTTP status code
    async fn send_report(&self, report: &Report) -> Result<u16>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            user_agent: format!("sentiment-dapp/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed [`RollupClient`]
#[derive(Debug, Clone)]
pub struct HttpRollupClient {
    client: Client,
    base_url: String,
}

impl HttpRollupClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: impl Into<String>, config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        debug!(url, "POST");

        self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else if e.is_builder() {
                    TransportError::InvalidUrl(url.clone())
                } else {
                    TransportError::RequestFailed(e.to_string())
                }
            })
    }
}

#[async_trait]
impl RollupClient for HttpRollupClient {
    async fn finish(&self, status: FinishStatus) -> Result<FinishResponse> {
        info!(%status, "Sending finish");
        let response = self.post("/finish", &FinishRequest { status }).await?;

        let code = response.status();
        info!(status_code = code.as_u16(), "Received finish status");

        if code == StatusCode::ACCEPTED {
            return Ok(FinishResponse::Idle);
        }

        if !code.is_success() {
            return Err(TransportError::UnexpectedStatus {
                endpoint: "/finish",
                status: code.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to read body: {}", e)))?;

        let request: RollupRequest = serde_json::from_slice(&body)
            .map_err(|e| TransportError::MalformedBody(e.to_string()))?;

        Ok(FinishResponse::Request(request))
    }

    async fn send_notice(&self, notice: &Notice) -> Result<u16> {
        let response = self.post("/notice", notice).await?;
        Ok(response.status().as_u16())
    }

    async fn send_report(&self, report: &Report) -> Result<u16> {
        let response = self.post("/report", report).await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert!(config.user_agent.starts_with("sentiment-dapp/"));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpRollupClient::new("http://127.0.0.1:5004/", HttpConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5004");
        assert_eq!(client.endpoint("/finish"), "http://127.0.0.1:5004/finish");
    }

    #[tokio::test]
    async fn test_empty_base_url_fails_as_invalid_url() {
        let client = HttpRollupClient::new("", HttpConfig::default()).unwrap();
        let result = client.finish(FinishStatus::Accept).await;
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }
}
