//! Weekly report endpoint
//!
//! The export feed: already-computed numbers for the PDF/export
//! consumer, which renders them without further computation.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::ApiResponse;
use shared::models::{AggregatedTraffic, weekday_name};

use super::{ApiResult, store_params_or_default};
use crate::core::AppState;
use crate::schedule::{generate_slots, granularity_hours, total_effective_hours, weeks};
use crate::traffic::resolve_day_traffic;

#[derive(Debug, Serialize)]
pub struct DayHoursSummary {
    pub date: NaiveDate,
    pub weekday: String,
    pub effective_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct WeekReport {
    pub week: String,
    pub days: Vec<DayHoursSummary>,
    pub total_effective_hours: f64,
    /// The store's approved weekly hours budget, for the hours-vs-budget
    /// line of the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_hours_approved: Option<f64>,
    /// The week's traffic profile (resolved for the week's Monday)
    pub traffic: Option<AggregatedTraffic>,
}

/// GET /api/stores/:id/weeks/:week/report
pub async fn get_week_report(
    State(state): State<AppState>,
    Path((store_id, week)): Path<(String, String)>,
) -> ApiResult<WeekReport> {
    let dates = weeks::week_dates(&week)?;
    let params = store_params_or_default(&state, &store_id).await;

    let slots = generate_slots(
        params.country.as_deref(),
        params.open_spec.as_deref(),
        params.close_spec.as_deref(),
    );
    let granularity = granularity_hours(params.country.as_deref());

    let mut days = Vec::with_capacity(dates.len());
    let mut total_effective = 0.0;
    for date in &dates {
        let assignments = match state.activity.day_assignments(&store_id, *date).await {
            Ok(assignments) => assignments,
            Err(e) => {
                tracing::warn!(
                    store = %store_id,
                    %date,
                    error = %e,
                    "Activity data unavailable, reporting the day as empty"
                );
                Vec::new()
            }
        };

        let effective_hours = total_effective_hours(&assignments, &slots, granularity);
        total_effective += effective_hours;
        days.push(DayHoursSummary {
            date: *date,
            weekday: weekday_name(date.weekday()).to_string(),
            effective_hours,
        });
    }

    let traffic = resolve_day_traffic(
        state.history.as_ref(),
        state.traffic.as_ref(),
        &store_id,
        &params,
        dates[0],
    )
    .await;

    Ok(Json(ApiResponse::ok(WeekReport {
        week,
        days,
        total_effective_hours: total_effective,
        contract_hours_approved: params.contract_hours_approved,
        traffic,
    })))
}
