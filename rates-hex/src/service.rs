//! Exchange Rate Application Service
//!
//! Fronts the aggregator with the response cache and builds the metrics
//! report. Contains NO transport logic.

use tracing::instrument;

use rates_types::{ApiMetrics, ExchangeRateRequest, ExchangeRateResponse, MetricsResponse, RatesError};

use crate::aggregator::RateAggregator;
use crate::cache::ResponseCache;

/// Application service for exchange rate lookups.
pub struct ExchangeRateService {
    aggregator: RateAggregator,
    cache: ResponseCache<ExchangeRateResponse>,
}

impl ExchangeRateService {
    pub fn new(aggregator: RateAggregator, cache: ResponseCache<ExchangeRateResponse>) -> Self {
        Self { aggregator, cache }
    }

    pub fn aggregator(&self) -> &RateAggregator {
        &self.aggregator
    }

    pub fn cache(&self) -> &ResponseCache<ExchangeRateResponse> {
        &self.cache
    }

    /// Gets merged rates for `base` against the comma-separated `symbols`.
    ///
    /// Equivalent requests within the cache TTL are served without touching
    /// the upstream providers.
    #[instrument(skip(self))]
    pub async fn get_exchange_rates(
        &self,
        base: Option<&str>,
        symbols: Option<&str>,
    ) -> Result<ExchangeRateResponse, RatesError> {
        let request = ExchangeRateRequest::from_params(base, symbols)?;

        self.cache
            .get_or_compute(request.cache_key(), || self.aggregator.aggregate(&request))
            .await
    }

    /// Current counters for every provider, in fixed order.
    pub fn metrics_report(&self) -> MetricsResponse {
        let metrics = self.aggregator.metrics();

        let api_metrics = self
            .aggregator
            .providers()
            .into_iter()
            .map(|provider| {
                let stats = metrics.provider_stats(provider.name());
                ApiMetrics {
                    datasource: provider.display_name().to_string(),
                    total_requests: stats.requests,
                    total_responses: stats.responses,
                    total_errors: stats.errors,
                    average_response_time: stats.average_response_time,
                    last_response_time: stats.last_response_time,
                    success_rate: stats.success_rate(),
                }
            })
            .collect();

        MetricsResponse {
            total_requests: metrics.total_requests(),
            api_metrics,
        }
    }
}
