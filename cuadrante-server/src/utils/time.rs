//! Date parsing helpers
//!
//! All path parameters carrying dates use `YYYY-MM-DD`; conversion to
//! typed dates happens once, at the API boundary.

use chrono::NaiveDate;
use shared::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_format(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_ok() {
        let date = parse_date("2025-03-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("10/03/2025").is_err());
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2025-13-40").is_err());
    }
}
