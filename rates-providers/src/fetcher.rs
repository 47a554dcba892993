//! reqwest implementation of the outbound HTTP port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use rates_types::{HttpFetcher, JsonResponse, UpstreamError};

/// Connection settings for upstream calls.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    /// Whole-request deadline, kept below the aggregator's own timeout.
    pub request_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(500),
            request_timeout: Duration::from_millis(700),
            pool_max_idle_per_host: 20,
        }
    }
}

/// Pooled reqwest client. Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    request_timeout: Duration,
}

impl ReqwestFetcher {
    pub fn new(config: &HttpClientConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| UpstreamError::Http(e.to_string()))?;

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.request_timeout.as_millis() as u64)
        } else {
            UpstreamError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, UpstreamError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| self.map_error(e))?;

        let body = if bytes.is_empty() {
            None
        } else if status.is_success() {
            Some(serde_json::from_slice(&bytes)?)
        } else {
            // Error pages are often HTML; their content is never read.
            serde_json::from_slice(&bytes).ok()
        };

        Ok(JsonResponse {
            status: status.as_u16(),
            body,
        })
    }
}
