//! Frankfurter API (European Central Bank reference rates).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use rates_types::{HttpFetcher, RateMap, RateProvider, UpstreamError};

/// Default endpoint for the latest rates.
pub const FRANKFURTER_URL: &str = "https://api.frankfurter.dev/v1/latest";

/// Relevant part of a Frankfurter response.
#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
}

pub struct FrankfurterProvider<F: HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl<F: HttpFetcher> FrankfurterProvider<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: FRANKFURTER_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn url(&self, base: &str, symbols: &[String]) -> Result<Url, UpstreamError> {
        let symbols = symbols
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join(",");

        Url::parse_with_params(
            &self.base_url,
            &[("base", base.to_uppercase()), ("symbols", symbols)],
        )
        .map_err(|e| UpstreamError::Http(format!("invalid URL {}: {}", self.base_url, e)))
    }
}

#[async_trait]
impl<F: HttpFetcher> RateProvider for FrankfurterProvider<F> {
    fn name(&self) -> &'static str {
        "frankfurter"
    }

    fn display_name(&self) -> &'static str {
        "Frankfurter API"
    }

    async fn fetch(&self, base: &str, symbols: &[String]) -> Result<RateMap, UpstreamError> {
        let url = self.url(base, symbols)?;
        let resp = self.fetcher.get_json(url.as_str()).await?;

        let Some(body) = resp.success_body() else {
            return Ok(RateMap::new());
        };

        let latest: LatestRates = serde_json::from_value(body.clone())?;

        Ok(latest
            .rates
            .unwrap_or_default()
            .into_iter()
            .map(|(symbol, rate)| (symbol.to_uppercase(), rate))
            .collect())
    }
}
