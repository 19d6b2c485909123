//! Standard live traffic aggregation
//!
//! The live path looks at the week containing the target date: one
//! sample per day, bucketed by weekday, with per-hour averages over the
//! fixed 10:00–21:00 counter window. Missing days count as zero — the
//! divisor is always 7 — so a half-recorded week reads as a quiet week,
//! not a short one.

use chrono::{Datelike, Duration, NaiveDate};
use shared::AppResult;
use shared::models::{AggregatedTraffic, DaySample, HourCounts, HourlyProfile, weekday_name};
use std::collections::BTreeMap;

use super::fetch;
use crate::records::TrafficSource;
use crate::schedule::weeks;
use crate::utils::money;

/// Fixed counter window: hours 10:00 through 21:00 inclusive
pub const WINDOW_START_HOUR: u32 = 10;
pub const WINDOW_END_HOUR: u32 = 21;

/// Hours strictly below this split into the morning total
pub const AFTERNOON_SPLIT_HOUR: u32 = 14;

/// Label for a whole hour (`"10:00"`)
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}

fn label_hour(label: &str) -> Option<u32> {
    label.split(':').next()?.parse().ok()
}

/// Morning/afternoon totals of a profile, split at hour 14
pub fn split_totals(profile: &HourlyProfile) -> (HourCounts, HourCounts) {
    let mut morning = HourCounts::default();
    let mut afternoon = HourCounts::default();

    for (label, counts) in profile {
        match label_hour(label) {
            Some(hour) if hour < AFTERNOON_SPLIT_HOUR => morning.add(counts),
            Some(_) => afternoon.add(counts),
            None => {}
        }
    }
    (morning, afternoon)
}

/// Average of summed counts: nearest integer for entries/tickets,
/// 2-decimal for revenue
pub(super) fn average_counts(sum: &HourCounts, divisor: f64) -> HourCounts {
    HourCounts {
        entries: (sum.entries / divisor).round(),
        tickets: (sum.tickets / divisor).round(),
        revenue: money::round2(sum.revenue / divisor),
    }
}

/// First/last sample dates, falling back to the requested range when no
/// sample came back
pub(super) fn period_bounds(
    samples: &BTreeMap<NaiveDate, DaySample>,
    requested: &[NaiveDate],
) -> (NaiveDate, NaiveDate) {
    match (samples.keys().next(), samples.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            let first = requested.iter().min().copied().unwrap_or_default();
            let last = requested.iter().max().copied().unwrap_or_default();
            (first, last)
        }
    }
}

/// Aggregate the live week containing `target_date`.
///
/// Fails as a whole on any fetch or decode error — callers must fall
/// back explicitly rather than render partial data.
pub async fn aggregate_week(
    source: &dyn TrafficSource,
    store_code: &str,
    target_date: NaiveDate,
) -> AppResult<AggregatedTraffic> {
    let monday = weeks::monday_of(target_date);
    let dates: Vec<NaiveDate> = (0..7).map(|offset| monday + Duration::days(offset)).collect();

    let samples = fetch::fetch_samples(source, store_code, dates.iter().copied()).await?;
    tracing::debug!(
        store = %store_code,
        week = %weeks::week_of(target_date),
        days = samples.len(),
        "Aggregated live traffic week"
    );

    let mut by_weekday = AggregatedTraffic::empty_by_weekday();
    for (date, sample) in &samples {
        if let Some(bucket) = by_weekday.get_mut(weekday_name(date.weekday())) {
            *bucket = sample.hours.clone();
        }
    }

    // Across-week hourly averages over the fixed window; the divisor
    // stays 7 even when days are missing
    let mut hours_of_interest = HourlyProfile::new();
    for hour in WINDOW_START_HOUR..=WINDOW_END_HOUR {
        let label = hour_label(hour);
        let mut sum = HourCounts::default();
        for sample in samples.values() {
            if let Some(counts) = sample.hours.get(&label) {
                sum.add(counts);
            }
        }
        hours_of_interest.insert(label, average_counts(&sum, 7.0));
    }

    let (total_morning, total_afternoon) = split_totals(&hours_of_interest);
    let (period_start, period_end) = period_bounds(&samples, &dates);

    Ok(AggregatedTraffic {
        hours_of_interest,
        by_weekday,
        total_morning,
        total_afternoon,
        period_start,
        period_end,
        is_historical: false,
        reference_weeks_used: vec![format!("Semana {}", weeks::week_of(target_date))],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pairs: &[(&str, f64)]) -> HourlyProfile {
        pairs
            .iter()
            .map(|(label, entries)| (label.to_string(), HourCounts::new(*entries, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_split_totals_at_hour_14() {
        let profile = profile(&[
            ("10:00", 5.0),
            ("13:00", 7.0),
            ("14:00", 11.0),
            ("20:00", 3.0),
        ]);

        let (morning, afternoon) = split_totals(&profile);
        assert_eq!(morning.entries, 12.0);
        assert_eq!(afternoon.entries, 14.0);
    }

    #[test]
    fn test_average_counts_rounding() {
        let sum = HourCounts::new(10.0, 3.0, 100.0);
        let avg = average_counts(&sum, 7.0);
        // 10/7 = 1.43 -> 1, 3/7 = 0.43 -> 0, 100/7 = 14.285... -> 14.29
        assert_eq!(avg.entries, 1.0);
        assert_eq!(avg.tickets, 0.0);
        assert_eq!(avg.revenue, 14.29);
    }

    #[test]
    fn test_hour_label_zero_padded() {
        assert_eq!(hour_label(10), "10:00");
        assert_eq!(hour_label(9), "09:00");
    }
}
