//! Traffic sample and aggregation models
//!
//! Raw counter data arrives in two wire shapes: the current one with
//! per-hour `{entries, tickets, revenue}` objects, and a legacy one with
//! a bare entries count per hour. Both are normalized into [`HourCounts`]
//! at deserialization so downstream logic only ever sees one shape.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical weekday names, Monday first, as used for `by_weekday` keys
/// and week-view column headers.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

/// Canonical name for a weekday
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Counter values for one hour of one day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HourCounts {
    /// People entering the store
    #[serde(default)]
    pub entries: f64,
    /// Tickets issued
    #[serde(default)]
    pub tickets: f64,
    /// Revenue in currency units (2-decimal precision)
    #[serde(default)]
    pub revenue: f64,
}

impl HourCounts {
    pub fn new(entries: f64, tickets: f64, revenue: f64) -> Self {
        Self {
            entries,
            tickets,
            revenue,
        }
    }

    /// Accumulate another hour's counts into this one
    pub fn add(&mut self, other: &HourCounts) {
        self.entries += other.entries;
        self.tickets += other.tickets;
        self.revenue += other.revenue;
    }
}

/// One hour on the wire: current object shape or legacy bare count
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawHour {
    Counts {
        #[serde(default)]
        entries: f64,
        #[serde(default)]
        tickets: f64,
        #[serde(default)]
        revenue: f64,
    },
    Legacy(f64),
}

impl From<RawHour> for HourCounts {
    fn from(raw: RawHour) -> Self {
        // Counters are non-negative by contract; clamp anything odd at the boundary
        match raw {
            RawHour::Counts {
                entries,
                tickets,
                revenue,
            } => HourCounts {
                entries: entries.max(0.0),
                tickets: tickets.max(0.0),
                revenue: revenue.max(0.0),
            },
            RawHour::Legacy(entries) => HourCounts {
                entries: entries.max(0.0),
                tickets: 0.0,
                revenue: 0.0,
            },
        }
    }
}

/// One calendar date's per-hour traffic counters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawDaySample")]
pub struct DaySample {
    pub date: NaiveDate,
    /// Hour label (`"HH:00"`) to counters
    pub hours: BTreeMap<String, HourCounts>,
}

#[derive(Deserialize)]
struct RawDaySample {
    date: NaiveDate,
    #[serde(default)]
    hours: BTreeMap<String, RawHour>,
}

impl From<RawDaySample> for DaySample {
    fn from(raw: RawDaySample) -> Self {
        Self {
            date: raw.date,
            hours: raw
                .hours
                .into_iter()
                .map(|(label, hour)| (label, hour.into()))
                .collect(),
        }
    }
}

/// Per-slot traffic profile: slot label (`"HH:MM"`) to counters
pub type HourlyProfile = BTreeMap<String, HourCounts>;

/// The unit produced by every comparison strategy and consumed by the
/// staffing recommendation formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedTraffic {
    /// The target day's profile
    pub hours_of_interest: HourlyProfile,
    /// Seven weekday buckets, always all present; a weekday with no
    /// contributing samples holds an empty profile
    pub by_weekday: BTreeMap<String, HourlyProfile>,
    /// Totals of the averaged hourly values before hour 14
    pub total_morning: HourCounts,
    /// Totals of the averaged hourly values from hour 14 on
    pub total_afternoon: HourCounts,
    /// First date of the underlying samples
    pub period_start: NaiveDate,
    /// Last date of the underlying samples
    pub period_end: NaiveDate,
    /// Whether a historical comparison strategy produced this
    pub is_historical: bool,
    /// Human-readable attribution of what was aggregated
    pub reference_weeks_used: Vec<String>,
}

impl AggregatedTraffic {
    /// All seven weekday buckets, empty — the starting point of every
    /// aggregation so no weekday key is ever missing.
    pub fn empty_by_weekday() -> BTreeMap<String, HourlyProfile> {
        WEEKDAY_NAMES
            .iter()
            .map(|name| (name.to_string(), HourlyProfile::new()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_hours_normalized() {
        let json = r#"{
            "date": "2025-03-10",
            "hours": {
                "10:00": 42,
                "11:00": {"entries": 12, "tickets": 5, "revenue": 130.5}
            }
        }"#;

        let sample: DaySample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.hours["10:00"], HourCounts::new(42.0, 0.0, 0.0));
        assert_eq!(sample.hours["11:00"], HourCounts::new(12.0, 5.0, 130.5));
    }

    #[test]
    fn test_partial_object_hours_default_missing_fields() {
        let json = r#"{"date": "2025-03-10", "hours": {"12:00": {"entries": 7}}}"#;
        let sample: DaySample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.hours["12:00"], HourCounts::new(7.0, 0.0, 0.0));
    }

    #[test]
    fn test_negative_counters_clamped() {
        let json = r#"{"date": "2025-03-10", "hours": {"10:00": -3}}"#;
        let sample: DaySample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.hours["10:00"], HourCounts::default());
    }

    #[test]
    fn test_weekday_names_monday_first() {
        assert_eq!(weekday_name(Weekday::Mon), "lunes");
        assert_eq!(weekday_name(Weekday::Sun), "domingo");
    }

    #[test]
    fn test_empty_by_weekday_has_all_seven() {
        let buckets = AggregatedTraffic::empty_by_weekday();
        assert_eq!(buckets.len(), 7);
        for name in WEEKDAY_NAMES {
            assert!(buckets[name].is_empty());
        }
    }
}
