//! Staffing recommendation formula
//!
//! `recommendation = (entries × (1 + growth)) / (attention / 2)`.
//! Attention is "customers served per employee pair per hour", hence the
//! half divisor. A configured per-hour minimum acts as a coverage floor.

use shared::models::HourlyProfile;
use shared::{AppError, AppResult, ErrorCode};
use std::collections::BTreeMap;

use crate::utils::money;

/// Options applied on top of the raw formula
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Coverage floor: computed values below it clamp up
    pub minimum: Option<f64>,
    /// Round to whole headcount instead of exact 2-decimal output
    pub round_to_integer: bool,
}

/// Recommended headcount for one hour's entry count.
///
/// `attention <= 0` is a configuration error and is rejected rather
/// than divided through silently. Zero entries yield zero — the growth
/// factor never conjures staff out of an empty hour.
pub fn recommend(
    entries: f64,
    attention: f64,
    growth: f64,
    options: &RecommendOptions,
) -> AppResult<f64> {
    if !attention.is_finite() || attention <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::AttentionInvalid,
            format!("desired attention must be positive, got {attention}"),
        ));
    }
    if !entries.is_finite() || !growth.is_finite() {
        return Err(AppError::validation(format!(
            "entries and growth factor must be finite, got {entries} / {growth}"
        )));
    }

    let mut value = (entries * (1.0 + growth)) / (attention / 2.0);
    if let Some(minimum) = options.minimum
        && value < minimum
    {
        value = minimum;
    }

    Ok(if options.round_to_integer {
        value.round()
    } else {
        money::round2(value)
    })
}

/// Recommendations for every hour of a traffic profile
pub fn recommend_profile(
    profile: &HourlyProfile,
    attention: f64,
    growth: f64,
    options: &RecommendOptions,
) -> AppResult<BTreeMap<String, f64>> {
    profile
        .iter()
        .map(|(label, counts)| {
            recommend(counts.entries, attention, growth, options).map(|r| (label.clone(), r))
        })
        .collect()
}

/// Ceiling-rounded headcount for "minimum staff needed" displays
pub fn minimum_staff(recommendation: f64) -> f64 {
    recommendation.max(0.0).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::HourCounts;

    #[test]
    fn test_zero_entries_stay_zero() {
        let r = recommend(0.0, 25.0, 0.05, &RecommendOptions::default()).unwrap();
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_formula_boundary() {
        // (50 x 1) / 12.5
        let r = recommend(50.0, 25.0, 0.0, &RecommendOptions::default()).unwrap();
        assert_eq!(r, 4.0);
    }

    #[test]
    fn test_growth_factor_applied() {
        // (100 x 1.05) / 12.5 = 8.4
        let r = recommend(100.0, 25.0, 0.05, &RecommendOptions::default()).unwrap();
        assert_eq!(r, 8.4);
    }

    #[test]
    fn test_integer_rounding() {
        let options = RecommendOptions {
            round_to_integer: true,
            ..Default::default()
        };
        let r = recommend(100.0, 25.0, 0.05, &options).unwrap();
        assert_eq!(r, 8.0);
    }

    #[test]
    fn test_minimum_clamps_up() {
        let options = RecommendOptions {
            minimum: Some(2.0),
            ..Default::default()
        };
        let r = recommend(10.0, 25.0, 0.0, &options).unwrap();
        // 0.8 computed, floored to the configured coverage minimum
        assert_eq!(r, 2.0);
    }

    #[test]
    fn test_nonpositive_attention_rejected() {
        assert!(recommend(50.0, 0.0, 0.05, &RecommendOptions::default()).is_err());
        assert!(recommend(50.0, -5.0, 0.05, &RecommendOptions::default()).is_err());
    }

    #[test]
    fn test_profile_recommendations() {
        let mut profile = shared::models::HourlyProfile::new();
        profile.insert("10:00".into(), HourCounts::new(50.0, 0.0, 0.0));
        profile.insert("11:00".into(), HourCounts::new(0.0, 0.0, 0.0));

        let recs =
            recommend_profile(&profile, 25.0, 0.0, &RecommendOptions::default()).unwrap();
        assert_eq!(recs["10:00"], 4.0);
        assert_eq!(recs["11:00"], 0.0);
    }

    #[test]
    fn test_minimum_staff_ceiling() {
        assert_eq!(minimum_staff(8.4), 9.0);
        assert_eq!(minimum_staff(4.0), 4.0);
        assert_eq!(minimum_staff(0.0), 0.0);
    }
}
