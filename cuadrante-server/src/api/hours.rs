//! Effective-hours endpoint

use axum::Json;
use axum::extract::{Path, State};
use chrono::NaiveDate;
use serde::Serialize;
use shared::ApiResponse;

use super::{ApiResult, store_params_or_default};
use crate::core::AppState;
use crate::schedule::{employee_hours, generate_slots, granularity_hours, total_effective_hours};
use crate::utils::time;

#[derive(Debug, Serialize)]
pub struct EmployeeHoursEntry {
    pub employee_id: String,
    pub employee_name: String,
    pub productive_hours: f64,
    pub medical_leave_hours: f64,
    /// Absent when the employee has no declared contract hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_hours: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DayHoursResponse {
    pub date: NaiveDate,
    /// Store-wide net effective hours, clamped at zero
    pub effective_hours: f64,
    pub employees: Vec<EmployeeHoursEntry>,
}

/// GET /api/stores/:id/days/:date/hours
pub async fn get_day_hours(
    State(state): State<AppState>,
    Path((store_id, date)): Path<(String, String)>,
) -> ApiResult<DayHoursResponse> {
    let date = time::parse_date(&date)?;
    let params = store_params_or_default(&state, &store_id).await;

    let slots = generate_slots(
        params.country.as_deref(),
        params.open_spec.as_deref(),
        params.close_spec.as_deref(),
    );
    let granularity = granularity_hours(params.country.as_deref());

    let assignments = state.activity.day_assignments(&store_id, date).await?;

    let effective_hours = total_effective_hours(&assignments, &slots, granularity);
    let employees = assignments
        .iter()
        .map(|assignment| {
            let hours = employee_hours(assignment, &slots, granularity);
            EmployeeHoursEntry {
                employee_id: assignment.employee_id.clone(),
                employee_name: assignment.employee_name.clone(),
                productive_hours: hours.productive,
                medical_leave_hours: hours.medical_leave,
                overtime_hours: hours.overtime,
            }
        })
        .collect();

    Ok(Json(ApiResponse::ok(DayHoursResponse {
        date,
        effective_hours,
        employees,
    })))
}
