//! Fan-out/fan-in over the two upstream providers.
//!
//! Each provider call runs as its own task under a fixed timeout. Failures,
//! empty answers and timeouts all count as "no data" for that provider; the
//! lookup only fails when neither provider produced anything.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{Instrument, debug, error, instrument, warn};

use rates_types::{
    ExchangeRateRequest, ExchangeRateResponse, RateMap, RateProvider, RatesError, merge_rates,
};

use crate::metrics::MetricsRegistry;

/// Upper bound on a single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_millis(800);

/// Records a provider call's latency when dropped, whichever way the call
/// ended.
struct LatencyGuard {
    metrics: Arc<MetricsRegistry>,
    provider: &'static str,
    started: Instant,
}

impl LatencyGuard {
    fn start(metrics: Arc<MetricsRegistry>, provider: &'static str) -> Self {
        Self {
            metrics,
            provider,
            started: Instant::now(),
        }
    }
}

impl Drop for LatencyGuard {
    fn drop(&mut self) {
        self.metrics
            .record_time(self.provider, self.started.elapsed());
    }
}

/// Queries both providers concurrently and merges what they return.
pub struct RateAggregator {
    primary: Arc<dyn RateProvider>,
    secondary: Arc<dyn RateProvider>,
    metrics: Arc<MetricsRegistry>,
    timeout: Duration,
}

impl RateAggregator {
    pub fn new(
        primary: Arc<dyn RateProvider>,
        secondary: Arc<dyn RateProvider>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            primary,
            secondary,
            metrics,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Providers in reporting order.
    pub fn providers(&self) -> [&dyn RateProvider; 2] {
        [self.primary.as_ref(), self.secondary.as_ref()]
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches from both providers and merges the results.
    ///
    /// Returns [`RatesError::ProviderUnavailable`] when both came back empty.
    #[instrument(skip(self, request), fields(base = %request.base(), symbols = %request.raw_symbols()))]
    pub async fn aggregate(
        &self,
        request: &ExchangeRateRequest,
    ) -> Result<ExchangeRateResponse, RatesError> {
        self.metrics.increment_total_requests();
        debug!("Querying upstream providers");

        let symbols: Arc<[String]> = request.symbols().into();

        let (first, second) = tokio::join!(
            self.bounded_fetch(&self.primary, request.base(), &symbols),
            self.bounded_fetch(&self.secondary, request.base(), &symbols),
        );

        if first.is_empty() && second.is_empty() {
            error!("Both exchange rate providers failed to return data");
            return Err(RatesError::ProviderUnavailable(
                "Unable to fetch exchange rates from any provider".into(),
            ));
        }

        Ok(ExchangeRateResponse::new(
            request.base(),
            merge_rates(&first, &second),
        ))
    }

    /// Runs one provider call on its own task and waits at most `timeout`.
    ///
    /// A call that overruns keeps running detached; its metrics are still
    /// recorded when it finishes but its rates are dropped.
    async fn bounded_fetch(
        &self,
        provider: &Arc<dyn RateProvider>,
        base: &str,
        symbols: &Arc<[String]>,
    ) -> RateMap {
        let name = provider.name();
        let task = tokio::spawn(
            instrumented_fetch(
                provider.clone(),
                self.metrics.clone(),
                base.to_string(),
                symbols.clone(),
            )
            .in_current_span(),
        );

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(rates)) => rates,
            Ok(Err(join_err)) => {
                self.metrics.increment_errors(name);
                warn!(provider = name, error = %join_err, "Provider task failed");
                RateMap::new()
            }
            Err(_) => {
                warn!(
                    provider = name,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Provider timed out, discarding its result"
                );
                RateMap::new()
            }
        }
    }
}

/// One provider call with its bookkeeping. Errors become an empty map.
async fn instrumented_fetch(
    provider: Arc<dyn RateProvider>,
    metrics: Arc<MetricsRegistry>,
    base: String,
    symbols: Arc<[String]>,
) -> RateMap {
    let name = provider.name();
    let _latency = LatencyGuard::start(metrics.clone(), name);
    metrics.increment_requests(name);

    match provider.fetch(&base, &symbols).await {
        Ok(rates) => {
            if !rates.is_empty() {
                metrics.increment_responses(name);
            }
            debug!(provider = name, count = rates.len(), "Provider returned rates");
            rates
        }
        Err(e) => {
            metrics.increment_errors(name);
            warn!(provider = name, error = %e, "{} API failure", name);
            RateMap::new()
        }
    }
}
