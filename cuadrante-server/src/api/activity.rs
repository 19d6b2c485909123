//! Activity grid update endpoint

use axum::Json;
use axum::extract::{Path, State};
use shared::models::SlotUpdate;
use shared::response::Empty;
use shared::{ApiResponse, AppError, ErrorCode};

use super::{ApiResult, store_params_or_default};
use crate::core::AppState;
use crate::schedule::generate_slots;
use crate::utils::time;

/// PUT /api/stores/:id/days/:date/activity
///
/// Sets one employee's one slot to one status tag, or clears it when
/// the payload carries an empty status.
pub async fn put_slot(
    State(state): State<AppState>,
    Path((store_id, date)): Path<(String, String)>,
    Json(update): Json<SlotUpdate>,
) -> ApiResult<Empty> {
    let date = time::parse_date(&date)?;

    if !update.is_clear() && update.parsed_status().is_none() {
        return Err(AppError::validation(format!(
            "Unknown status tag: {}",
            update.status
        )));
    }

    let params = store_params_or_default(&state, &store_id).await;
    let slots = generate_slots(
        params.country.as_deref(),
        params.open_spec.as_deref(),
        params.close_spec.as_deref(),
    );
    if !slots.iter().any(|slot| *slot == update.slot) {
        return Err(AppError::with_message(
            ErrorCode::SlotUnknown,
            format!("Slot {} is outside the store's grid", update.slot),
        ));
    }

    state.activity.set_slot(&store_id, date, &update).await?;
    tracing::info!(
        store = %store_id,
        %date,
        employee = %update.employee_id,
        slot = %update.slot,
        cleared = update.is_clear(),
        "Activity slot updated"
    );

    Ok(Json(ApiResponse::ok(Empty)))
}
