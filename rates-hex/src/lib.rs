//! # Rates Hex
//!
//! Application core and HTTP adapter for the exchange rate aggregator.
//!
//! ## Architecture
//!
//! - `aggregator` - Concurrent fan-out to both providers and result merging
//! - `cache` - Bounded TTL/LRU cache fronting the aggregator
//! - `metrics` - Lock-free counters and latency accumulators
//! - `service` - Application service (cache + aggregator + reporting)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Providers are injected as `Arc<dyn RateProvider>`, so the core never
//! depends on a concrete upstream.

pub mod aggregator;
pub mod cache;
pub mod inbound;
pub mod metrics;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use aggregator::{DEFAULT_PROVIDER_TIMEOUT, RateAggregator};
pub use cache::{CacheConfig, CacheStats, ResponseCache};
pub use metrics::{MetricsRegistry, ProviderStats};
pub use service::ExchangeRateService;
