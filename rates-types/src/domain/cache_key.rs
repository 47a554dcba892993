//! Canonical cache keys for exchange rate lookups.

use std::fmt;

use crate::error::RatesError;

/// Order, case and whitespace insensitive key for a `(base, symbols)` pair.
///
/// Rendered as `BASE:SYM1,SYM2,...`. Symbols are upper-cased and sorted but
/// not de-duplicated, so `"EUR,EUR"` and `"EUR"` map to different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from raw request parameters.
    ///
    /// Both parameters must be present; an absent one is rejected with
    /// [`RatesError::InvalidArgument`] naming it.
    pub fn normalize(base: Option<&str>, symbols: Option<&str>) -> Result<Self, RatesError> {
        let base = base.ok_or_else(|| RatesError::missing_parameter("base"))?;
        let symbols = symbols.ok_or_else(|| RatesError::missing_parameter("symbols"))?;
        Ok(Self::from_parts(base, symbols))
    }

    /// Builds a key from parameters already known to be present.
    pub fn from_parts(base: &str, symbols: &str) -> Self {
        // Trailing separators carry no symbol.
        let mut parts: Vec<String> = symbols
            .trim_end_matches(',')
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .collect();
        parts.sort();

        Self(format!("{}:{}", base.to_uppercase(), parts.join(",")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
