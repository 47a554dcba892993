//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::{ApiMetrics, ErrorResponse, ExchangeRateResponse, ExchangeRatesQuery, MetricsResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Get averaged exchange rates from both upstream providers
#[utoipa::path(
    get,
    path = "/api/exchange-rates",
    tag = "rates",
    params(ExchangeRatesQuery),
    responses(
        (status = 200, description = "Merged exchange rates", body = ExchangeRateResponse),
        (status = 400, description = "Missing required parameter", body = ErrorResponse),
        (status = 503, description = "No provider returned data", body = ErrorResponse)
    )
)]
async fn get_exchange_rates() {}

/// Request counters and latency per provider
#[utoipa::path(
    get,
    path = "/api/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Aggregated metrics", body = MetricsResponse)
    )
)]
async fn get_metrics() {}

/// OpenAPI documentation for the exchange rate API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exchange Rate Aggregator API",
        version = "1.0.0",
        description = "Averages exchange rates from the free currency rates API and the Frankfurter API.\n\nResponses are cached per base currency and symbol set for one hour.",
        license(name = "MIT"),
    ),
    paths(health, get_exchange_rates, get_metrics),
    components(
        schemas(
            ExchangeRateResponse,
            MetricsResponse,
            ApiMetrics,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Exchange rate lookups"),
        (name = "metrics", description = "Upstream provider metrics"),
    )
)]
pub struct ApiDoc;
