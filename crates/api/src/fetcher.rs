//! Statement fetcher backed by reqwest and the local filesystem.

use std::time::Duration;

use async_trait::async_trait;
use finsync_core::pipeline::FetchError;
use finsync_core::ports::StatementFetcher;
use serde_json::Value;
use tracing::debug;

/// Default request timeout for provider endpoints.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches provider documents over HTTP(S), or from disk for any other location.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a fetcher with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("finsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                location: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Request {
            location: url.to_string(),
            message: e.to_string(),
        })?;
        parse_document(url, &body)
    }

    async fn fetch_file(path: &str) -> Result<Value, FetchError> {
        let body = tokio::fs::read(path).await.map_err(|e| FetchError::Io {
            location: path.to_string(),
            message: e.to_string(),
        })?;
        parse_document(path, &body)
    }
}

#[async_trait]
impl StatementFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<Value, FetchError> {
        debug!(location, "Fetching statement document");
        if is_remote(location) {
            self.fetch_remote(location).await
        } else {
            Self::fetch_file(location).await
        }
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn parse_document(location: &str, body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Parse {
        location: location.to_string(),
        message: e.to_string(),
    })
}
