//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use rates_types::{AppError, ErrorResponse, ExchangeRatesQuery, RatesError};

use crate::ExchangeRateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState {
    pub service: ExchangeRateService,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<RatesError> for ApiError {
    fn from(err: RatesError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => {
                tracing::error!("Unexpected error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Get exchange rates for a base currency against the requested symbols.
#[tracing::instrument(skip(state))]
pub async fn get_exchange_rates(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ExchangeRatesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let rates = state
        .service
        .get_exchange_rates(query.base.as_deref(), query.symbols.as_deref())
        .await
        .inspect_err(|e| tracing::warn!("Exchange rate lookup failed: {}", e))?;

    Ok(Json(rates))
}

/// Application metrics including per-provider performance.
#[tracing::instrument(skip(state))]
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Retrieving application metrics");
    Json(state.service.metrics_report())
}

/// Generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
