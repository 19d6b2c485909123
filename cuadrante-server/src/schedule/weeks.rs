//! Week identifiers and date enumeration
//!
//! Identifiers look like `"W24 2025"`: the week containing January 4th
//! is week 1 and weeks start on Monday. This is NOT full ISO-8601 week
//! numbering — there is no correction for years where week 1 starts
//! mid-week or for week-53 boundary years. Stored historical
//! configuration is keyed by these identifiers, so the scheme must stay
//! exactly as it is.

use chrono::{Datelike, Duration, NaiveDate};
use shared::{AppError, AppResult};

/// Week identifier (`"W<NN> <YYYY>"`) of a calendar date
pub fn week_of(date: NaiveDate) -> String {
    let anchor = week_one_monday(date.year());
    let days = (date - anchor).num_days();
    let week = (1 + days.div_euclid(7)).clamp(1, 53);
    format!("W{:02} {}", week, date.year())
}

/// Monday of the week a date belongs to
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven dates (Monday..Sunday) of a week identifier
pub fn week_dates(week_id: &str) -> AppResult<Vec<NaiveDate>> {
    let (week, year) = parse_week_id(week_id)?;
    let monday = week_one_monday(year) + Duration::weeks(week as i64 - 1);
    Ok((0..7).map(|offset| monday + Duration::days(offset)).collect())
}

/// Parse `"W<NN> <YYYY>"` into (week, year)
fn parse_week_id(week_id: &str) -> AppResult<(u32, i32)> {
    let invalid = || AppError::invalid_format(format!("Invalid week identifier: {}", week_id));

    let (week, year) = week_id.trim().split_once(' ').ok_or_else(invalid)?;
    let week: u32 = week.strip_prefix('W').ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    if !(1..=53).contains(&week) {
        return Err(invalid());
    }
    Ok((week, year))
}

/// Monday of the week containing January 4th
fn week_one_monday(year: i32) -> NaiveDate {
    // unwrap: January 4th exists in every year chrono can represent
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).unwrap();
    monday_of(jan4)
}
