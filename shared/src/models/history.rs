//! Historical comparison configuration
//!
//! A store's historical configuration maps a target week to either an
//! ordered list of reference weeks (averaged) or an exact day-to-day
//! mapping. On the wire the two variants are discriminated by the
//! `type: "comparable_por_dia"` tag; here they are an explicit enum so
//! no downstream code ever duck-types on object shape.

use chrono::NaiveDate;
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Wire discriminant of the day-exact variant
pub const DAY_MAPPING_TAG: &str = "comparable_por_dia";

/// Configuration payload for one target week
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoricalConfig {
    /// Ordered reference weeks (`"W25 2024"`, …) to average
    ReferenceWeeks(Vec<String>),
    /// Exact target-date to reference-date pairs, up to one per weekday
    DayMapping(BTreeMap<NaiveDate, NaiveDate>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Weeks(Vec<String>),
    Tagged {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        mapping: BTreeMap<NaiveDate, NaiveDate>,
    },
}

impl<'de> Deserialize<'de> for HistoricalConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawConfig::deserialize(deserializer)? {
            RawConfig::Weeks(weeks) => Ok(Self::ReferenceWeeks(weeks)),
            RawConfig::Tagged { kind, mapping } if kind == DAY_MAPPING_TAG => {
                Ok(Self::DayMapping(mapping))
            }
            RawConfig::Tagged { kind, .. } => Err(D::Error::custom(format!(
                "unknown historical configuration type: {kind}"
            ))),
        }
    }
}

impl Serialize for HistoricalConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::ReferenceWeeks(weeks) => weeks.serialize(serializer),
            Self::DayMapping(mapping) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", DAY_MAPPING_TAG)?;
                map.serialize_entry("mapping", mapping)?;
                map.end()
            }
        }
    }
}
