//! In-process metrics registry.
//!
//! Named counters and timing series backed by atomics in a concurrent map.
//! Writers never block each other; readers see each value atomically but get
//! no snapshot across values.
//!
//! Provider metrics are also exported through an OpenTelemetry meter when one
//! is attached, tagged with `source=<provider>`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use tracing::trace;

/// Counter incremented once per aggregated (uncached) lookup.
pub const TOTAL_REQUESTS: &str = "api.requests.total";

const REQUESTS: &str = "api.requests";
const RESPONSES: &str = "api.responses";
const ERRORS: &str = "api.errors";
const TIME: &str = "api.time";

/// Registry key for a per-provider metric, e.g. `api.errors.frankfurter`.
pub fn metric_key(metric: &str, provider: &str) -> String {
    format!("{}.{}", metric, provider)
}

#[derive(Debug, Default)]
struct TimingStats {
    total_ms: AtomicU64,
    calls: AtomicU64,
    last_ms: AtomicU64,
}

impl TimingStats {
    fn record(&self, millis: u64) {
        self.total_ms.fetch_add(millis, Ordering::Relaxed);
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.last_ms.store(millis, Ordering::Relaxed);
    }

    fn count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn average(&self) -> f64 {
        let calls = self.calls.load(Ordering::Relaxed);
        if calls == 0 {
            return 0.0;
        }
        self.total_ms.load(Ordering::Relaxed) as f64 / calls as f64
    }
}

/// Point-in-time view of one provider's counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderStats {
    pub requests: u64,
    pub responses: u64,
    pub errors: u64,
    pub average_response_time: f64,
    pub last_response_time: u64,
    /// Number of latency samples recorded.
    pub timed_calls: u64,
}

impl ProviderStats {
    /// Percentage of requests that produced data; 0 before the first request.
    pub fn success_rate(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.responses as f64 / self.requests as f64 * 100.0
    }
}

/// OpenTelemetry instruments mirroring the provider metrics.
struct OtelInstruments {
    requests: Counter<u64>,
    responses: Counter<u64>,
    errors: Counter<u64>,
    time: Histogram<u64>,
}

impl OtelInstruments {
    fn new(meter: &Meter) -> Self {
        Self {
            requests: meter
                .u64_counter(REQUESTS)
                .with_description("Requests issued to an upstream provider")
                .build(),
            responses: meter
                .u64_counter(RESPONSES)
                .with_description("Upstream calls that returned rates")
                .build(),
            errors: meter
                .u64_counter(ERRORS)
                .with_description("Upstream calls that failed")
                .build(),
            time: meter
                .u64_histogram(TIME)
                .with_description("Upstream call latency")
                .with_unit("ms")
                .build(),
        }
    }
}

fn source(provider: &str) -> [KeyValue; 1] {
    [KeyValue::new("source", provider.to_string())]
}

/// Thread-safe counters and timers, shared via `Arc`.
///
/// Created once at startup and passed to whoever records or reports. There
/// is deliberately no reset.
#[derive(Default)]
pub struct MetricsRegistry {
    counters: DashMap<String, AtomicU64>,
    timers: DashMap<String, TimingStats>,
    otel: Option<OtelInstruments>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that also reports provider metrics to `meter`.
    pub fn with_meter(meter: &Meter) -> Self {
        Self {
            otel: Some(OtelInstruments::new(meter)),
            ..Self::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Named counters and timers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn increment(&self, name: &str) {
        let value = self
            .counters
            .entry(name.to_string())
            .or_default()
            .fetch_add(1, Ordering::Relaxed)
            + 1;
        trace!(metric = name, value, "counter incremented");
    }

    /// Current counter value; 0 for a counter never incremented.
    pub fn get(&self, name: &str) -> u64 {
        self.counters
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn record(&self, name: &str, duration_ms: u64) {
        self.timers
            .entry(name.to_string())
            .or_default()
            .record(duration_ms);
        trace!(metric = name, duration_ms, "timing recorded");
    }

    /// Lifetime mean of every duration recorded under `name`.
    pub fn average_of(&self, name: &str) -> f64 {
        self.timers.get(name).map(|t| t.average()).unwrap_or(0.0)
    }

    /// Number of durations recorded under `name`.
    pub fn count_of(&self, name: &str) -> u64 {
        self.timers.get(name).map(|t| t.count()).unwrap_or(0)
    }

    pub fn last_of(&self, name: &str) -> u64 {
        self.timers
            .get(name)
            .map(|t| t.last_ms.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Provider bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    pub fn increment_total_requests(&self) {
        self.increment(TOTAL_REQUESTS);
    }

    pub fn total_requests(&self) -> u64 {
        self.get(TOTAL_REQUESTS)
    }

    pub fn increment_requests(&self, provider: &str) {
        self.increment(&metric_key(REQUESTS, provider));
        if let Some(otel) = &self.otel {
            otel.requests.add(1, &source(provider));
        }
    }

    pub fn increment_responses(&self, provider: &str) {
        self.increment(&metric_key(RESPONSES, provider));
        if let Some(otel) = &self.otel {
            otel.responses.add(1, &source(provider));
        }
    }

    pub fn increment_errors(&self, provider: &str) {
        self.increment(&metric_key(ERRORS, provider));
        if let Some(otel) = &self.otel {
            otel.errors.add(1, &source(provider));
        }
    }

    pub fn record_time(&self, provider: &str, elapsed: Duration) {
        let millis = elapsed.as_millis() as u64;
        self.record(&metric_key(TIME, provider), millis);
        if let Some(otel) = &self.otel {
            otel.time.record(millis, &source(provider));
        }
    }

    pub fn average_time(&self, provider: &str) -> f64 {
        self.average_of(&metric_key(TIME, provider))
    }

    pub fn last_time(&self, provider: &str) -> u64 {
        self.last_of(&metric_key(TIME, provider))
    }

    pub fn provider_stats(&self, provider: &str) -> ProviderStats {
        ProviderStats {
            requests: self.get(&metric_key(REQUESTS, provider)),
            responses: self.get(&metric_key(RESPONSES, provider)),
            errors: self.get(&metric_key(ERRORS, provider)),
            average_response_time: self.average_time(provider),
            last_response_time: self.last_time(provider),
            timed_calls: self.count_of(&metric_key(TIME, provider)),
        }
    }
}
