//! Staffing recommendation endpoint

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ApiResponse;
use shared::models::AggregatedTraffic;
use std::collections::BTreeMap;

use super::{ApiResult, store_params_or_default};
use crate::core::AppState;
use crate::staffing::{RecommendOptions, recommend_profile};
use crate::traffic::resolve_day_traffic;
use crate::utils::time;

/// GET /api/stores/:id/days/:date/staffing?round=true
#[derive(Debug, Deserialize)]
pub struct StaffingQuery {
    /// Round recommendations to whole headcount
    #[serde(default)]
    pub round: bool,
}

#[derive(Debug, Serialize)]
pub struct StaffingResponse {
    pub date: NaiveDate,
    /// The traffic profile the recommendations are based on; `null`
    /// when no data could be aggregated
    pub traffic: Option<AggregatedTraffic>,
    /// Hour label to recommended headcount
    pub recommendations: BTreeMap<String, f64>,
}

pub async fn get_staffing(
    State(state): State<AppState>,
    Path((store_id, date)): Path<(String, String)>,
    Query(query): Query<StaffingQuery>,
) -> ApiResult<StaffingResponse> {
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

    let options = RecommendOptions {
        minimum: None,
        round_to_integer: query.round,
    };
    let recommendations = match &traffic {
        Some(traffic) => recommend_profile(
            &traffic.hours_of_interest,
            params.attention(),
            params.growth(),
            &options,
        )?,
        None => BTreeMap::new(),
    };

    Ok(Json(ApiResponse::ok(StaffingResponse {
        date,
        traffic,
        recommendations,
    })))
}
