//! Rate maps and the merged response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Symbol -> rate, keyed by upper-cased currency code.
pub type RateMap = BTreeMap<String, f64>;

/// Aggregated rates for one request.
///
/// Built once by the aggregator and never mutated afterwards; the cache
/// hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateResponse {
    /// Base currency as requested
    #[schema(example = "USD")]
    base: String,
    /// Merged rates per symbol
    #[schema(example = json!({"EUR": 0.92, "GBP": 0.79}))]
    rates: RateMap,
    /// When the rates were computed
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    timestamp: DateTime<Utc>,
}

impl ExchangeRateResponse {
    /// Creates a response stamped with the current time.
    pub fn new(base: impl Into<String>, rates: RateMap) -> Self {
        Self {
            base: base.into(),
            rates,
            timestamp: Utc::now(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rates(&self) -> &RateMap {
        &self.rates
    }

    pub fn rate(&self, symbol: &str) -> Option<f64> {
        self.rates.get(symbol).copied()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Merges two provider results.
///
/// A symbol reported by both providers gets the arithmetic mean; a symbol
/// reported by one is passed through unchanged.
pub fn merge_rates(first: &RateMap, second: &RateMap) -> RateMap {
    let mut merged = first.clone();
    for (symbol, &rate) in second {
        merged
            .entry(symbol.clone())
            .and_modify(|existing| *existing = (*existing + rate) / 2.0)
            .or_insert(rate);
    }
    merged
}
