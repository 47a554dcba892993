//! Validated exchange rate request.

use crate::domain::CacheKey;
use crate::error::RatesError;

/// A `(base, symbols)` lookup as received from a caller.
///
/// The raw symbol string is kept alongside the parsed list so the cache key
/// is derived from exactly what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRateRequest {
    base: String,
    raw_symbols: String,
    symbols: Vec<String>,
}

impl ExchangeRateRequest {
    pub fn new(base: impl Into<String>, symbols: impl Into<String>) -> Self {
        let base = base.into();
        let raw_symbols = symbols.into();
        let symbols = raw_symbols
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            base,
            raw_symbols,
            symbols,
        }
    }

    /// Validates optional request parameters, naming the first missing one.
    pub fn from_params(base: Option<&str>, symbols: Option<&str>) -> Result<Self, RatesError> {
        let base = base.ok_or_else(|| RatesError::missing_parameter("base"))?;
        let symbols = symbols.ok_or_else(|| RatesError::missing_parameter("symbols"))?;
        Ok(Self::new(base, symbols))
    }

    /// Base currency exactly as the caller sent it.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Trimmed, non-blank symbols in request order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn raw_symbols(&self) -> &str {
        &self.raw_symbols
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from_parts(&self.base, &self.raw_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_trimmed_and_blank_dropped() {
        let req = ExchangeRateRequest::new("USD", " eur, ,GBP,");
        assert_eq!(req.symbols(), ["eur", "GBP"]);
        assert_eq!(req.base(), "USD");
    }

    #[test]
    fn test_from_params_names_missing_parameter() {
        let err = ExchangeRateRequest::from_params(Some("USD"), None).unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameter: symbols");
    }

    #[test]
    fn test_cache_key_uses_raw_symbols() {
        let req = ExchangeRateRequest::new("usd", "gbp, eur");
        assert_eq!(req.cache_key().as_str(), "USD:EUR,GBP");
    }
}
