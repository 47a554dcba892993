//! Exchange rate provider port.
//!
//! One implementation per upstream source. The aggregator fans out to these
//! and never sees the upstream wire format.

use crate::domain::RateMap;
use crate::error::UpstreamError;

/// Port trait for upstream exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Stable identifier used to key metrics, e.g. `"frankfurter"`.
    fn name(&self) -> &'static str;

    /// Human readable name shown in the metrics report.
    fn display_name(&self) -> &'static str;

    /// Fetches rates quoted in `base` for the requested `symbols`.
    ///
    /// Returns an empty map when the upstream answers without usable data.
    /// Transport and decoding failures are returned as errors; callers decide
    /// how to recover.
    async fn fetch(&self, base: &str, symbols: &[String]) -> Result<RateMap, UpstreamError>;
}
