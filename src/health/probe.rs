//! Control plane reachability probe.
//!
//! # Responsibilities
//! - Derive the status URL from the discovery address
//! - Issue a single GET with a bounded timeout
//! - Classify the outcome
//!
//! # Design Decisions
//! - Connection errors and timeouts are failures
//! - 5xx are failures, every other status (including 4xx) is success
//! - The response body is always drained before classification

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time;

use crate::observability::metrics;

/// Control plane monitoring port.
pub const STATUS_PORT: u16 = 15014;

/// Upper bound for a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Why a probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("control plane status {status} from {url}")]
    ServerError { url: String, status: u16 },
}

/// A single reachability check.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self) -> Result<(), ProbeError>;
}

/// Build the status URL for a discovery address.
///
/// The host is everything before the first colon; the port is always
/// [`STATUS_PORT`].
pub fn status_url(discovery_address: &str) -> String {
    let host = discovery_address
        .split(':')
        .next()
        .unwrap_or(discovery_address);
    format!("http://{}:{}", host, STATUS_PORT)
}

/// HTTP probe against the control plane status port.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    /// Probe the control plane behind `discovery_address`.
    pub fn new(discovery_address: &str) -> Self {
        Self::with_url(status_url(discovery_address))
    }

    /// Probe an explicit URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to build probe client, using defaults");
                reqwest::Client::new()
            });

        Self {
            client,
            url: url.into(),
        }
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn check(&self) -> Result<(), ProbeError> {
        match time::timeout(PROBE_TIMEOUT, self.request()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout {
                url: self.url.clone(),
            }),
        }
    }

    async fn request(&self) -> Result<(), ProbeError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();

        // Drain so the connection can be reused
        if let Err(e) = response.bytes().await {
            tracing::debug!(url = %self.url, error = %e, "Failed to drain probe response body");
        }

        if status.as_u16() >= 500 {
            return Err(ProbeError::ServerError {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        let result = self.check().await;
        metrics::record_probe(result.is_ok());
        result
    }
}
