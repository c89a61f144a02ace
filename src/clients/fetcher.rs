//! The network collaborator: given a URL, return the document text or fail.

use crate::lifecycle::config::HttpConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Why a fetch produced no document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} unavailable: {reason}")]
    Unavailable { url: String, reason: String },
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Anything that can turn a URL into raw text.
///
/// Object safe so the lookup service can hold an `Arc<dyn Fetcher>` and tests
/// can substitute [`ScriptedFetcher`](crate::clients::mock::ScriptedFetcher).
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetcher`] backed by `reqwest`. Non-success HTTP statuses count as failures.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let builder = reqwest::Client::builder();
        let builder = match config.timeout_ms {
            Some(ms) => builder.timeout(Duration::from_millis(ms)),
            None => builder,
        };
        let builder = match &config.user_agent {
            Some(agent) => builder.user_agent(agent.clone()),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Response");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
