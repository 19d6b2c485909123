//! Aggregated traffic endpoint

use axum::Json;
use axum::extract::{Path, State};
use shared::ApiResponse;
use shared::models::AggregatedTraffic;

use super::{ApiResult, store_params_or_default};
use crate::core::AppState;
use crate::traffic::resolve_day_traffic;
use crate::utils::time;

/// GET /api/stores/:id/days/:date/traffic
///
/// The day view's chart feed. `data` is `null` when nothing could be
/// aggregated; the client renders its own "no data" state.
pub async fn get_traffic(
    State(state): State<AppState>,
    Path((store_id, date)): Path<(String, String)>,
) -> ApiResult<Option<AggregatedTraffic>> {
    let date = time::parse_date(&date)?;
    let params = store_params_or_default(&state, &store_id).await;

    let traffic = resolve_day_traffic(
        state.history.as_ref(),
        state.traffic.as_ref(),
        &store_id,
        &params,
        date,
    )
    .await;

    Ok(Json(ApiResponse::ok(traffic)))
}
