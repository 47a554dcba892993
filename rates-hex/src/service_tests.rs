//! ExchangeRateService and RateAggregator unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use rates_types::{RateMap, RateProvider, RatesError, UpstreamError};

    use crate::{CacheConfig, ExchangeRateService, MetricsRegistry, RateAggregator, ResponseCache};

    pub const FREE: &str = "free_exchange";
    pub const FRANK: &str = "frankfurter";

    /// How a mock provider answers.
    #[derive(Clone)]
    pub enum Reply {
        Rates(RateMap),
        Fail,
        Slow(Duration, RateMap),
        Panic,
    }

    /// Scripted provider that counts its calls.
    pub struct MockProvider {
        name: &'static str,
        display_name: &'static str,
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockProvider {
        pub fn new(name: &'static str, reply: Reply) -> Arc<Self> {
            let display_name = if name == FREE {
                "Free currency rates API"
            } else {
                "Frankfurter API"
            };
            Arc::new(Self {
                name,
                display_name,
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn display_name(&self) -> &'static str {
            self.display_name
        }

        async fn fetch(&self, _base: &str, _symbols: &[String]) -> Result<RateMap, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Rates(rates) => Ok(rates.clone()),
                Reply::Fail => Err(UpstreamError::Http("connection refused".into())),
                Reply::Slow(delay, rates) => {
                    tokio::time::sleep(*delay).await;
                    Ok(rates.clone())
                }
                Reply::Panic => panic!("provider blew up"),
            }
        }
    }

    pub fn rates(pairs: &[(&str, f64)]) -> RateMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    pub struct Harness {
        pub service: ExchangeRateService,
        pub free: Arc<MockProvider>,
        pub frank: Arc<MockProvider>,
        pub metrics: Arc<MetricsRegistry>,
    }

    pub fn harness(free: Reply, frank: Reply) -> Harness {
        let free = MockProvider::new(FREE, free);
        let frank = MockProvider::new(FRANK, frank);
        let metrics = Arc::new(MetricsRegistry::new());
        let aggregator = RateAggregator::new(free.clone(), frank.clone(), metrics.clone());
        let service =
            ExchangeRateService::new(aggregator, ResponseCache::new(CacheConfig::default()));

        Harness {
            service,
            free,
            frank,
            metrics,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Merging
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_returns_average_rate_from_both_apis() {
        let h = harness(
            Reply::Rates(rates(&[("EUR", 1.1)])),
            Reply::Rates(rates(&[("EUR", 1.3)])),
        );

        let response = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        assert_eq!(response.base(), "USD");
        assert!((response.rate("EUR").unwrap() - 1.2).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_merges_partial_overlap() {
        let h = harness(
            Reply::Rates(rates(&[("EUR", 1.1), ("GBP", 0.9)])),
            Reply::Rates(rates(&[("EUR", 1.3)])),
        );

        let response = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR,GBP"))
            .await
            .unwrap();

        assert_eq!(response.rates().len(), 2);
        assert!((response.rate("EUR").unwrap() - 1.2).abs() < 0.001);
        assert_eq!(response.rate("GBP"), Some(0.9));
    }

    #[tokio::test]
    async fn test_returns_single_provider_if_other_is_empty() {
        let h = harness(Reply::Rates(rates(&[("EUR", 1.1)])), Reply::Rates(RateMap::new()));

        let response = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        assert_eq!(response.rate("EUR"), Some(1.1));
    }

    #[tokio::test]
    async fn test_returns_single_provider_if_other_fails() {
        let h = harness(Reply::Fail, Reply::Rates(rates(&[("EUR", 1.3)])));

        let response = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        assert_eq!(response.rate("EUR"), Some(1.3));
        assert_eq!(h.metrics.provider_stats(FREE).errors, 1);
        assert_eq!(h.metrics.provider_stats(FREE).responses, 0);
    }

    #[tokio::test]
    async fn test_keeps_original_base() {
        let h = harness(Reply::Rates(rates(&[("EUR", 1.1)])), Reply::Fail);

        let response = h
            .service
            .get_exchange_rates(Some("usd"), Some("eur"))
            .await
            .unwrap();

        assert_eq!(response.base(), "usd");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Failure handling
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fails_if_both_providers_empty() {
        let h = harness(Reply::Rates(RateMap::new()), Reply::Fail);

        let err = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap_err();

        assert!(matches!(err, RatesError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let h = harness(Reply::Fail, Reply::Fail);

        for _ in 0..2 {
            let result = h.service.get_exchange_rates(Some("USD"), Some("EUR")).await;
            assert!(result.is_err());
        }

        assert_eq!(h.free.calls(), 2);
        assert_eq!(h.frank.calls(), 2);
        assert!(h.service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameter_skips_providers() {
        let h = harness(Reply::Rates(rates(&[("EUR", 1.1)])), Reply::Fail);

        let err = h
            .service
            .get_exchange_rates(None, Some("EUR"))
            .await
            .unwrap_err();

        assert!(matches!(err, RatesError::InvalidArgument(_)));
        assert_eq!(h.free.calls(), 0);
        assert_eq!(h.metrics.total_requests(), 0);
    }

    #[tokio::test]
    async fn test_panicking_provider_counts_as_error() {
        let h = harness(Reply::Panic, Reply::Rates(rates(&[("EUR", 1.3)])));

        let response = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        assert_eq!(response.rate("EUR"), Some(1.3));
        let stats = h.metrics.provider_stats(FREE);
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.timed_calls, 1);
    }

    #[tokio::test]
    async fn test_failing_provider_records_latency_once() {
        let h = harness(Reply::Fail, Reply::Rates(rates(&[("EUR", 1.3)])));

        h.service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        let stats = h.metrics.provider_stats(FREE);
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.responses, 0);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.timed_calls, 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Timeouts
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_is_dropped_after_timeout() {
        let h = harness(
            Reply::Slow(Duration::from_secs(5), rates(&[("EUR", 9.9)])),
            Reply::Rates(rates(&[("EUR", 1.3)])),
        );

        let started = tokio::time::Instant::now();
        let response = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        assert_eq!(response.rate("EUR"), Some(1.3));
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(800) && waited < Duration::from_secs(5));
        assert_eq!(h.metrics.provider_stats(FREE).responses, 0);
        assert_eq!(h.metrics.provider_stats(FREE).timed_calls, 0);

        // The abandoned call still finishes in the background and is timed.
        tokio::time::sleep(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;

        let stats = h.metrics.provider_stats(FREE);
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.timed_calls, 1);
        assert_eq!(stats.last_response_time, 5000);
        assert_eq!(stats.average_response_time, 5000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_providers_timing_out_is_unavailable() {
        let slow = Reply::Slow(Duration::from_secs(2), rates(&[("EUR", 1.0)]));
        let h = harness(slow.clone(), slow);

        let err = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap_err();

        assert!(matches!(err, RatesError::ProviderUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timeout_applies() {
        let free = MockProvider::new(
            FREE,
            Reply::Slow(Duration::from_millis(300), rates(&[("EUR", 1.1)])),
        );
        let frank = MockProvider::new(FRANK, Reply::Rates(rates(&[("EUR", 1.3)])));
        let metrics = Arc::new(MetricsRegistry::new());
        let aggregator =
            RateAggregator::new(free, frank, metrics).with_timeout(Duration::from_millis(200));
        let service =
            ExchangeRateService::new(aggregator, ResponseCache::new(CacheConfig::default()));

        let response = service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        assert_eq!(response.rate("EUR"), Some(1.3));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Metrics & cache
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_records_latency_once_per_call() {
        let h = harness(
            Reply::Slow(Duration::from_millis(100), rates(&[("EUR", 1.1)])),
            Reply::Slow(Duration::from_millis(300), rates(&[("EUR", 1.3)])),
        );

        h.service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();
        h.service
            .get_exchange_rates(Some("USD"), Some("GBP"))
            .await
            .unwrap();

        let free = h.metrics.provider_stats(FREE);
        assert_eq!(free.requests, 2);
        assert_eq!(free.responses, 2);
        assert_eq!(free.errors, 0);
        assert_eq!(free.last_response_time, 100);
        assert!((free.average_response_time - 100.0).abs() < 0.01);

        let frank = h.metrics.provider_stats(FRANK);
        assert_eq!(frank.last_response_time, 300);
        assert_eq!(h.metrics.total_requests(), 2);
    }

    #[tokio::test]
    async fn test_equivalent_requests_served_from_cache() {
        let h = harness(
            Reply::Rates(rates(&[("EUR", 1.1), ("GBP", 0.9)])),
            Reply::Rates(rates(&[("EUR", 1.3)])),
        );

        let first = h
            .service
            .get_exchange_rates(Some("USD"), Some("EUR,GBP"))
            .await
            .unwrap();
        let second = h
            .service
            .get_exchange_rates(Some("usd"), Some(" gbp , eur "))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(h.free.calls(), 1);
        assert_eq!(h.frank.calls(), 1);
        assert_eq!(h.metrics.total_requests(), 1);
        assert_eq!(h.service.cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_metrics_report_lists_both_providers() {
        let h = harness(Reply::Rates(rates(&[("EUR", 1.1)])), Reply::Fail);

        h.service
            .get_exchange_rates(Some("USD"), Some("EUR"))
            .await
            .unwrap();

        let report = h.service.metrics_report();
        assert_eq!(report.total_requests, 1);
        assert_eq!(report.api_metrics.len(), 2);

        let free = &report.api_metrics[0];
        assert_eq!(free.datasource, "Free currency rates API");
        assert_eq!(free.total_requests, 1);
        assert_eq!(free.total_responses, 1);
        assert_eq!(free.success_rate, 100.0);

        let frank = &report.api_metrics[1];
        assert_eq!(frank.datasource, "Frankfurter API");
        assert_eq!(frank.total_errors, 1);
        assert_eq!(frank.success_rate, 0.0);
    }
}
