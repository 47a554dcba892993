//! Domain types.
//!
//! Pure data structures and business rules: the canonical cache key, the
//! validated request and the merged rate response.

mod cache_key;
mod rates;
mod request;

pub use cache_key::CacheKey;
pub use rates::{ExchangeRateResponse, RateMap, merge_rates};
pub use request::ExchangeRateRequest;
