//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod http;
mod provider;

pub use http::{HttpFetcher, JsonResponse};
pub use provider::RateProvider;
