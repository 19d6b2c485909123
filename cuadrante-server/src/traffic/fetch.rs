//! Multi-date traffic fetching
//!
//! One aggregation pass needs anywhere from 7 to 28 dates. The bulk
//! endpoint is the fast path; when it errors, per-date fetches run with
//! bounded concurrency so the counter API is never flooded. Duplicate
//! dates collapse before any request is issued, so two strategies asking
//! for the same date within one pass share a single fetch.

use chrono::NaiveDate;
use futures::StreamExt;
use shared::AppResult;
use shared::models::DaySample;
use std::collections::{BTreeMap, BTreeSet};

use crate::records::TrafficSource;

/// Per-date fetches in flight at once on the individual-fetch path
pub const FETCH_BATCH_SIZE: usize = 6;

/// Fetch samples for a set of dates.
///
/// Dates without data are absent from the result; that is not a
/// failure. A transport or decode error on the individual path fails
/// the whole pass — callers decide whether that means "no data" or
/// "fall back to another strategy".
pub async fn fetch_samples(
    source: &dyn TrafficSource,
    store_code: &str,
    dates: impl IntoIterator<Item = NaiveDate>,
) -> AppResult<BTreeMap<NaiveDate, DaySample>> {
    let unique: Vec<NaiveDate> = dates
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if unique.is_empty() {
        return Ok(BTreeMap::new());
    }

    // Bulk fast path
    match source.fetch_days(store_code, &unique).await {
        Ok(samples) => return Ok(samples),
        Err(e) => {
            tracing::warn!(
                error = %e,
                dates = unique.len(),
                "Bulk traffic fetch failed, falling back to per-date fetches"
            );
        }
    }

    let results: Vec<(NaiveDate, AppResult<Option<DaySample>>)> =
        futures::stream::iter(unique.into_iter().map(|date| async move {
            (date, source.fetch_day(store_code, date).await)
        }))
        .buffer_unordered(FETCH_BATCH_SIZE)
        .collect()
        .await;

    let mut samples = BTreeMap::new();
    for (date, result) in results {
        match result? {
            Some(sample) => {
                samples.insert(date, sample);
            }
            None => tracing::debug!(%date, "No traffic sample for date"),
        }
    }
    Ok(samples)
}
