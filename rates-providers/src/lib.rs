//! Upstream Exchange Rate Providers
//!
//! Outbound adapters implementing [`RateProvider`] for the two upstream
//! sources, plus the reqwest-backed [`HttpFetcher`] they share.
//!
//! # Example
//! ```no_run
//! use rates_providers::{FrankfurterProvider, FreeExchangeProvider, HttpClientConfig, ReqwestFetcher};
//! use rates_types::RateProvider;
//!
//! # async fn run() -> Result<(), rates_types::UpstreamError> {
//! let fetcher = ReqwestFetcher::new(&HttpClientConfig::default())?;
//! let free = FreeExchangeProvider::new(fetcher.clone());
//! let frankfurter = FrankfurterProvider::new(fetcher);
//!
//! let symbols = vec!["EUR".to_string(), "GBP".to_string()];
//! let a = free.fetch("USD", &symbols).await?;
//! let b = frankfurter.fetch("USD", &symbols).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`RateProvider`]: rates_types::RateProvider
//! [`HttpFetcher`]: rates_types::HttpFetcher

mod fetcher;
mod frankfurter;
mod free_exchange;

#[cfg(test)]
mod testing;

pub use fetcher::{HttpClientConfig, ReqwestFetcher};
pub use frankfurter::{FRANKFURTER_URL, FrankfurterProvider};
pub use free_exchange::{FREE_EXCHANGE_URL, FreeExchangeProvider};
