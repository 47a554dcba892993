//! Canned HTTP fetcher for adapter tests.

use std::sync::Mutex;

use async_trait::async_trait;

use rates_types::{HttpFetcher, JsonResponse, UpstreamError};

/// Replies to every request with the same outcome and records the URLs.
pub struct StubFetcher {
    reply: Result<JsonResponse, UpstreamError>,
    urls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn replying(reply: Result<JsonResponse, UpstreamError>) -> Self {
        Self {
            reply,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(body: serde_json::Value) -> Self {
        Self::replying(Ok(JsonResponse::ok(body)))
    }

    pub fn status(status: u16) -> Self {
        Self::replying(Ok(JsonResponse { status, body: None }))
    }

    pub fn last_url(&self) -> Option<String> {
        self.urls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpFetcher for StubFetcher {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, UpstreamError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.reply.clone()
    }
}
