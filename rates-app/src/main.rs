//! # Exchange Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the pooled HTTP client and both upstream providers
//! - Create the aggregator, response cache and service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_hex::{
    ExchangeRateService, MetricsRegistry, RateAggregator, ResponseCache, inbound::HttpServer,
};
use rates_providers::{FrankfurterProvider, FreeExchangeProvider, ReqwestFetcher};

fn init_tracer(
    endpoint: &str,
) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("exchange-rates-service"), provider))
}

fn init_meter(endpoint: &str) -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing and metrics when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let meter_provider = config
        .otlp_endpoint
        .as_deref()
        .map(init_meter)
        .transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting exchange rates server on port {}", config.port);
    tracing::info!(
        timeout_ms = config.provider_timeout.as_millis() as u64,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        cache_max_entries = config.cache.max_entries,
        "Provider and cache settings"
    );

    // One pooled client shared by both providers
    let fetcher = ReqwestFetcher::new(&config.http)?;
    let free_exchange =
        FreeExchangeProvider::new(fetcher.clone()).with_base_url(&config.free_exchange_url);
    let frankfurter = FrankfurterProvider::new(fetcher).with_base_url(&config.frankfurter_url);

    // Create the service
    let metrics = Arc::new(match &meter_provider {
        Some(_) => MetricsRegistry::with_meter(&global::meter("exchange-rates-service")),
        None => MetricsRegistry::new(),
    });
    let aggregator = RateAggregator::new(Arc::new(free_exchange), Arc::new(frankfurter), metrics)
        .with_timeout(config.provider_timeout);
    let service = ExchangeRateService::new(aggregator, ResponseCache::new(config.cache.clone()));

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    if let Some(provider) = meter_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
