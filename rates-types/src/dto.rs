//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─────────────────────────────────────────────────────────────────────────────
// Exchange Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for an exchange rate lookup.
///
/// Both fields are optional at the binding layer so a missing one can be
/// reported by name instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExchangeRatesQuery {
    /// Base currency code
    #[param(example = "USD")]
    pub base: Option<String>,
    /// Comma-separated target currency codes
    #[param(example = "EUR,GBP")]
    pub symbols: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Metrics DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Per-provider metrics row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetrics {
    /// Display name of the upstream provider
    #[schema(example = "Frankfurter API")]
    pub datasource: String,
    pub total_requests: u64,
    pub total_responses: u64,
    pub total_errors: u64,
    /// Mean latency in milliseconds over the process lifetime
    pub average_response_time: f64,
    /// Latency of the most recent call in milliseconds
    pub last_response_time: u64,
    /// responses / requests * 100, or 0 with no requests
    pub success_rate: f64,
}

/// Metrics report for all providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    /// Aggregated lookups that missed the cache
    pub total_requests: u64,
    pub api_metrics: Vec<ApiMetrics>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error DTO
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
    #[schema(example = 503)]
    pub status: u16,
    /// HTTP reason phrase
    #[schema(example = "Service Unavailable")]
    pub error: String,
    #[schema(example = "Unable to fetch exchange rates from any provider")]
    pub message: String,
}
