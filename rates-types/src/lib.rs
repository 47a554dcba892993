//! # Rates Types
//!
//! Domain types and port traits for the exchange rate aggregator.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (requests, cache keys, rate maps)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, upstream and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CacheKey, ExchangeRateRequest, ExchangeRateResponse, RateMap, merge_rates};
pub use dto::*;
pub use error::{AppError, RatesError, UpstreamError};
pub use ports::{HttpFetcher, JsonResponse, RateProvider};
