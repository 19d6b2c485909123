//! Historical comparison strategies
//!
//! Three interchangeable strategies produce the same
//! [`AggregatedTraffic`] shape, all with `is_historical = true`:
//!
//! - multi-week average over the prior 4 calendar weeks (non-historical
//!   stores),
//! - configured reference-weeks average,
//! - exact day-to-day mapping (single-sample profiles, verbatim).
//!
//! Unlike the live path, averages here divide per cell by the number of
//! samples that actually carried the value: a week missing a weekday
//! contributes neither a zero nor to the denominator.
//!
//! [`resolve_day_traffic`] owns the selection and fallback chain and
//! never fails — worst case it yields the live path's result or `None`.

use chrono::{Datelike, Duration, NaiveDate};
use shared::models::{AggregatedTraffic, DaySample, HourCounts, HourlyProfile, weekday_name};
use shared::models::{HistoricalConfig, StoreParams};
use shared::{AppError, AppResult, ErrorCode};
use std::collections::BTreeMap;

use super::aggregate::{aggregate_week, average_counts, period_bounds, split_totals};
use super::fetch::fetch_samples;
use crate::records::{HistoryConfigSource, TrafficSource};
use crate::schedule::weeks;

/// Attribution label of the multi-week average strategy
pub const LAST_WEEKS_LABEL: &str = "Promedio últimas 4 semanas";

/// Calendar weeks the multi-week average looks back over
const LOOKBACK_WEEKS: i64 = 4;

/// Multi-week average: all 7 days of each of the prior 4 calendar
/// weeks, averaged per weekday/hour over the samples that exist.
pub async fn last_weeks_average(
    source: &dyn TrafficSource,
    store_code: &str,
    target_date: NaiveDate,
) -> AppResult<AggregatedTraffic> {
    let mut dates = Vec::with_capacity((LOOKBACK_WEEKS * 7) as usize);
    for back in 1..=LOOKBACK_WEEKS {
        let monday = weeks::monday_of(target_date - Duration::weeks(back));
        dates.extend((0..7).map(|offset| monday + Duration::days(offset)));
    }

    let samples = fetch_samples(source, store_code, dates.iter().copied()).await?;
    Ok(averaged_traffic(
        &samples,
        &dates,
        target_date,
        vec![LAST_WEEKS_LABEL.to_string()],
    ))
}

/// Configured reference-weeks average: the union of all reference
/// weeks' dates, grouped by weekday, averaged per cell over available
/// samples. Labeled with the literal configured week strings.
pub async fn reference_weeks_average(
    source: &dyn TrafficSource,
    store_code: &str,
    target_date: NaiveDate,
    reference_weeks: &[String],
) -> AppResult<AggregatedTraffic> {
    let mut dates = Vec::new();
    let mut used = Vec::new();
    for week_id in reference_weeks {
        match weeks::week_dates(week_id) {
            Ok(week) => {
                dates.extend(week);
                used.push(week_id.clone());
            }
            Err(e) => {
                tracing::warn!(week = %week_id, error = %e, "Skipping malformed reference week");
            }
        }
    }
    if dates.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::HistoryConfigInvalid,
            "No usable reference weeks configured",
        ));
    }

    let samples = fetch_samples(source, store_code, dates.iter().copied()).await?;
    Ok(averaged_traffic(&samples, &dates, target_date, used))
}

/// Exact day-to-day mapping: each mapped target date takes its
/// reference date's hourly profile verbatim, no averaging.
///
/// `scope` is the set of target dates to materialize — the whole week
/// for a week view, one date for a single-day lookup. The output shape
/// is complete either way.
pub async fn day_mapping_traffic(
    source: &dyn TrafficSource,
    store_code: &str,
    target_date: NaiveDate,
    mapping: &BTreeMap<NaiveDate, NaiveDate>,
    scope: &[NaiveDate],
) -> AppResult<AggregatedTraffic> {
    let pairs: Vec<(NaiveDate, NaiveDate)> = scope
        .iter()
        .filter_map(|date| mapping.get(date).map(|reference| (*date, *reference)))
        .collect();
    if pairs.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::HistoryConfigInvalid,
            "Day mapping has no entry for the requested dates",
        ));
    }

    let reference_dates: Vec<NaiveDate> = pairs.iter().map(|(_, reference)| *reference).collect();
    let samples = fetch_samples(source, store_code, reference_dates.iter().copied()).await?;

    let mut by_weekday = AggregatedTraffic::empty_by_weekday();
    for (target, reference) in &pairs {
        if let Some(sample) = samples.get(reference)
            && let Some(bucket) = by_weekday.get_mut(weekday_name(target.weekday()))
        {
            *bucket = sample.hours.clone();
        }
    }

    let hours_of_interest = by_weekday
        .get(weekday_name(target_date.weekday()))
        .cloned()
        .unwrap_or_default();
    let (total_morning, total_afternoon) = split_totals(&hours_of_interest);
    let (period_start, period_end) = period_bounds(&samples, &reference_dates);

    let reference_weeks_used = if pairs.len() == 1 {
        vec![format!("Día exacto: {}", pairs[0].1)]
    } else {
        let listed: Vec<String> = pairs.iter().map(|(_, r)| r.to_string()).collect();
        vec![format!("Días específicos: {}", listed.join(", "))]
    };

    Ok(AggregatedTraffic {
        hours_of_interest,
        by_weekday,
        total_morning,
        total_afternoon,
        period_start,
        period_end,
        is_historical: true,
        reference_weeks_used,
    })
}

/// Resolve the traffic profile for one day.
///
/// Non-historical stores get the multi-week average; historical stores
/// get whichever strategy their configuration for the target week
/// selects. A historical store with no entry for that week uses the
/// standard live path directly, and any strategy failure degrades to the
/// live path too. Never fails: worst case is `None`.
pub async fn resolve_day_traffic(
    history: &dyn HistoryConfigSource,
    source: &dyn TrafficSource,
    store_id: &str,
    params: &StoreParams,
    target_date: NaiveDate,
) -> Option<AggregatedTraffic> {
    let store_code = params.code_or(store_id);

    if !params.historical {
        match last_weeks_average(source, store_code, target_date).await {
            Ok(traffic) => return Some(traffic),
            Err(e) => {
                tracing::warn!(
                    store = %store_id,
                    error = %e,
                    "Multi-week average failed, falling back to live traffic"
                );
                return live_or_none(source, store_code, target_date).await;
            }
        }
    }

    let week_id = weeks::week_of(target_date);
    let config = match history.config_for_week(store_id, &week_id).await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                store = %store_id,
                week = %week_id,
                error = %e,
                "Historical configuration lookup failed, using live traffic"
            );
            None
        }
    };

    let attempt = match &config {
        // No entry for this week: straight to the live path
        None => return live_or_none(source, store_code, target_date).await,
        Some(HistoricalConfig::ReferenceWeeks(reference_weeks)) => {
            reference_weeks_average(source, store_code, target_date, reference_weeks).await
        }
        Some(HistoricalConfig::DayMapping(mapping)) => {
            let monday = weeks::monday_of(target_date);
            let scope: Vec<NaiveDate> =
                (0..7).map(|offset| monday + Duration::days(offset)).collect();
            day_mapping_traffic(source, store_code, target_date, mapping, &scope).await
        }
    };

    match attempt {
        Ok(traffic) => Some(traffic),
        Err(e) => {
            tracing::warn!(
                store = %store_id,
                week = %week_id,
                error = %e,
                "Historical strategy failed, falling back to live traffic"
            );
            live_or_none(source, store_code, target_date).await
        }
    }
}

async fn live_or_none(
    source: &dyn TrafficSource,
    store_code: &str,
    target_date: NaiveDate,
) -> Option<AggregatedTraffic> {
    match aggregate_week(source, store_code, target_date).await {
        Ok(traffic) => Some(traffic),
        Err(e) => {
            tracing::warn!(
                store = %store_code,
                error = %e,
                "Live traffic aggregation failed, no data for this day"
            );
            None
        }
    }
}

/// Build an averaged result from grouped samples: per-weekday, per-hour
/// averages over however many samples actually carry each cell.
fn averaged_traffic(
    samples: &BTreeMap<NaiveDate, DaySample>,
    requested: &[NaiveDate],
    target_date: NaiveDate,
    reference_weeks_used: Vec<String>,
) -> AggregatedTraffic {
    let mut by_weekday = AggregatedTraffic::empty_by_weekday();

    // weekday -> hour label -> (sum, contributing sample count)
    let mut cells: BTreeMap<&str, BTreeMap<String, (HourCounts, u32)>> = BTreeMap::new();
    for (date, sample) in samples {
        let bucket = cells.entry(weekday_name(date.weekday())).or_default();
        for (label, counts) in &sample.hours {
            let (sum, count) = bucket.entry(label.clone()).or_default();
            sum.add(counts);
            *count += 1;
        }
    }

    for (name, bucket) in cells {
        let profile: HourlyProfile = bucket
            .into_iter()
            .map(|(label, (sum, count))| (label, average_counts(&sum, count as f64)))
            .collect();
        by_weekday.insert(name.to_string(), profile);
    }

    let hours_of_interest = by_weekday
        .get(weekday_name(target_date.weekday()))
        .cloned()
        .unwrap_or_default();
    let (total_morning, total_afternoon) = split_totals(&hours_of_interest);
    let (period_start, period_end) = period_bounds(samples, requested);

    AggregatedTraffic {
        hours_of_interest,
        by_weekday,
        total_morning,
        total_afternoon,
        period_start,
        period_end,
        is_historical: true,
        reference_weeks_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(day: NaiveDate, pairs: &[(&str, f64)]) -> DaySample {
        DaySample {
            date: day,
            hours: pairs
                .iter()
                .map(|(label, entries)| (label.to_string(), HourCounts::new(*entries, 0.0, 0.0)))
                .collect(),
        }
    }

    #[test]
    fn test_per_cell_average_skips_missing_weeks() {
        // Three Tuesdays carry 14:00 data (10, 20, 30); the fourth week
        // has no Tuesday sample at all.
        let tuesdays = [date(2025, 5, 13), date(2025, 5, 20), date(2025, 5, 27)];
        let mut samples = BTreeMap::new();
        for (tuesday, entries) in tuesdays.iter().zip([10.0, 20.0, 30.0]) {
            samples.insert(*tuesday, sample(*tuesday, &[("14:00", entries)]));
        }

        let target = date(2025, 6, 10); // a Tuesday
        let traffic = averaged_traffic(&samples, &tuesdays, target, vec!["test".into()]);

        // (10 + 20 + 30) / 3, not / 4
        assert_eq!(traffic.hours_of_interest["14:00"].entries, 20.0);
    }

    #[test]
    fn test_weekday_without_samples_stays_empty() {
        let monday = date(2025, 6, 2);
        let mut samples = BTreeMap::new();
        samples.insert(monday, sample(monday, &[("10:00", 4.0)]));

        let traffic = averaged_traffic(&samples, &[monday], monday, vec!["test".into()]);

        assert_eq!(traffic.by_weekday.len(), 7);
        assert!(traffic.by_weekday["martes"].is_empty());
        assert!(!traffic.by_weekday["lunes"].is_empty());
    }

    #[test]
    fn test_per_cell_average_within_partial_hours() {
        // Both Mondays have samples, but only one carries 12:00
        let first = date(2025, 6, 2);
        let second = date(2025, 6, 9);
        let mut samples = BTreeMap::new();
        samples.insert(first, sample(first, &[("10:00", 6.0), ("12:00", 8.0)]));
        samples.insert(second, sample(second, &[("10:00", 10.0)]));

        let traffic = averaged_traffic(&samples, &[first, second], first, vec!["test".into()]);

        assert_eq!(traffic.hours_of_interest["10:00"].entries, 8.0);
        // 12:00 averages over the single sample that has it
        assert_eq!(traffic.hours_of_interest["12:00"].entries, 8.0);
    }

    #[test]
    fn test_averaged_traffic_is_marked_historical() {
        let monday = date(2025, 6, 2);
        let samples = BTreeMap::new();
        let traffic = averaged_traffic(&samples, &[monday], monday, vec!["test".into()]);
        assert!(traffic.is_historical);
        assert!(traffic.hours_of_interest.is_empty());
    }
}
