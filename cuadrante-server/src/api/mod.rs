//! HTTP API
//!
//! Thin axum handlers over the scheduling/traffic core. Handlers parse
//! path parameters once, tolerate half-filled store records, and always
//! answer with the uniform [`ApiResponse`] envelope.

pub mod activity;
pub mod hours;
pub mod report;
pub mod staffing;
pub mod traffic;

use axum::routing::{get, put};
use axum::{Json, Router};
use shared::models::StoreParams;
use shared::{ApiResponse, AppError};

use crate::core::AppState;

/// Result alias for handlers
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/stores/{id}/days/{date}/staffing",
            get(staffing::get_staffing),
        )
        .route(
            "/api/stores/{id}/days/{date}/traffic",
            get(traffic::get_traffic),
        )
        .route(
            "/api/stores/{id}/days/{date}/hours",
            get(hours::get_day_hours),
        )
        .route(
            "/api/stores/{id}/days/{date}/activity",
            put(activity::put_slot),
        )
        .route(
            "/api/stores/{id}/weeks/{week}/report",
            get(report::get_week_report),
        )
        .with_state(state)
}

async fn health() -> ApiResult<&'static str> {
    Ok(Json(ApiResponse::ok("ok")))
}

/// Store parameters with full-failure tolerance: a store record that
/// cannot be read degrades to defaults instead of failing the day view.
pub(crate) async fn store_params_or_default(state: &AppState, store_id: &str) -> StoreParams {
    match state.stores.store_params(store_id).await {
        Ok(params) => params,
        Err(e) => {
            tracing::warn!(
                store = %store_id,
                error = %e,
                "Store parameter lookup failed, using defaults"
            );
            StoreParams::default()
        }
    }
}
