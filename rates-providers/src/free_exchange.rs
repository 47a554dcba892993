//! Free currency rates API (fawazahmed0/currency-api on jsDelivr).
//!
//! One JSON document per base currency, shaped as
//! `{"date": "...", "usd": {"eur": 0.92, "gbp": 0.79, ...}}` with every code
//! lower-cased. The adapter picks the requested symbols out of it.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use rates_types::{HttpFetcher, RateMap, RateProvider, UpstreamError};

/// Default base URL; `{base}.json` is appended per request.
pub const FREE_EXCHANGE_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies";

const PROVIDER_NAME: &str = "free_exchange";

pub struct FreeExchangeProvider<F: HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl<F: HttpFetcher> FreeExchangeProvider<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: FREE_EXCHANGE_URL.to_string(),
        }
    }

    /// Points the adapter at a mirror of the currency API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn url(&self, base: &str) -> String {
        format!("{}/{}.json", self.base_url, base.to_lowercase())
    }
}

#[async_trait]
impl<F: HttpFetcher> RateProvider for FreeExchangeProvider<F> {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn display_name(&self) -> &'static str {
        "Free currency rates API"
    }

    async fn fetch(&self, base: &str, symbols: &[String]) -> Result<RateMap, UpstreamError> {
        let resp = self.fetcher.get_json(&self.url(base)).await?;

        let Some(body) = resp.success_body() else {
            return Ok(RateMap::new());
        };

        let base_key = base.to_lowercase();
        let Some(all_rates) = body.get(&base_key).and_then(Value::as_object) else {
            warn!(provider = PROVIDER_NAME, base, "no rates for base currency");
            return Ok(RateMap::new());
        };

        Ok(symbols
            .iter()
            .filter_map(|symbol| {
                all_rates
                    .get(&symbol.to_lowercase())
                    .and_then(Value::as_f64)
                    .map(|rate| (symbol.to_uppercase(), rate))
            })
            .collect())
    }
}
