//! Outbound HTTP port.
//!
//! Provider adapters issue plain GET requests through this trait so they can
//! be exercised without a network.

use crate::error::UpstreamError;

/// Status and decoded JSON body of an upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: u16,
    /// `None` when the body was empty or not JSON.
    pub body: Option<serde_json::Value>,
}

impl JsonResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body, if the response was successful and carried one.
    pub fn success_body(&self) -> Option<&serde_json::Value> {
        if self.is_success() {
            self.body.as_ref()
        } else {
            None
        }
    }
}

/// Port trait for timed GET requests returning JSON.
#[async_trait::async_trait]
pub trait HttpFetcher: Send + Sync + 'static {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, UpstreamError>;
}
