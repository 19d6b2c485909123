//! Activity grid models
//!
//! One [`ActivityAssignment`] is one employee's row in the day grid: a
//! map from slot label to status tag. The tags are a closed set and
//! arrive as Spanish wire values; unset slots are simply absent from the
//! map, and unknown or empty tags are dropped at deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot status tags as stored in the scheduling records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "TRABAJO")]
    Trabajo,
    #[serde(rename = "VACACIONES")]
    Vacaciones,
    #[serde(rename = "LIBRE")]
    Libre,
    #[serde(rename = "BAJA MÉDICA")]
    BajaMedica,
    #[serde(rename = "FORMACIÓN")]
    Formacion,
    #[serde(rename = "LACTANCIA")]
    Lactancia,
}

impl ActivityStatus {
    /// Parse a wire tag; empty and unknown tags are "unset"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "TRABAJO" => Some(Self::Trabajo),
            "VACACIONES" => Some(Self::Vacaciones),
            "LIBRE" => Some(Self::Libre),
            "BAJA MÉDICA" => Some(Self::BajaMedica),
            "FORMACIÓN" => Some(Self::Formacion),
            "LACTANCIA" => Some(Self::Lactancia),
            _ => None,
        }
    }

    /// The wire tag for this status
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Trabajo => "TRABAJO",
            Self::Vacaciones => "VACACIONES",
            Self::Libre => "LIBRE",
            Self::BajaMedica => "BAJA MÉDICA",
            Self::Formacion => "FORMACIÓN",
            Self::Lactancia => "LACTANCIA",
        }
    }

    /// Work and training count toward effective hours
    pub const fn is_productive(&self) -> bool {
        matches!(self, Self::Trabajo | Self::Formacion)
    }

    /// Medical leave subtracts from effective hours
    pub const fn is_medical_leave(&self) -> bool {
        matches!(self, Self::BajaMedica)
    }
}

/// One employee's activity record for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawAssignment")]
pub struct ActivityAssignment {
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    /// Slot label to status; unset slots are absent
    pub slots: BTreeMap<String, ActivityStatus>,
    /// Contracted hours for this day, used for overtime accounting
    pub contract_hours: Option<f64>,
}

#[derive(Deserialize)]
struct RawAssignment {
    employee_id: String,
    employee_name: String,
    date: NaiveDate,
    #[serde(default)]
    slots: BTreeMap<String, String>,
    #[serde(default)]
    contract_hours: Option<f64>,
}

impl From<RawAssignment> for ActivityAssignment {
    fn from(raw: RawAssignment) -> Self {
        Self {
            employee_id: raw.employee_id,
            employee_name: raw.employee_name,
            date: raw.date,
            slots: raw
                .slots
                .into_iter()
                .filter_map(|(slot, tag)| ActivityStatus::from_tag(&tag).map(|s| (slot, s)))
                .collect(),
            contract_hours: raw.contract_hours,
        }
    }
}

/// Single-field activity update: set one employee's one slot, or clear
/// it with an empty status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotUpdate {
    pub employee_id: String,
    /// Slot label (`"HH:MM"`)
    pub slot: String,
    /// Status tag; empty string clears the slot
    #[serde(default)]
    pub status: String,
}

impl SlotUpdate {
    /// The parsed status, `None` when this update clears the slot
    pub fn parsed_status(&self) -> Option<ActivityStatus> {
        ActivityStatus::from_tag(&self.status)
    }

    /// Whether this update clears the slot
    pub fn is_clear(&self) -> bool {
        self.status.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for status in [
            ActivityStatus::Trabajo,
            ActivityStatus::Vacaciones,
            ActivityStatus::Libre,
            ActivityStatus::BajaMedica,
            ActivityStatus::Formacion,
            ActivityStatus::Lactancia,
        ] {
            assert_eq!(ActivityStatus::from_tag(status.tag()), Some(status));
        }
    }

    #[test]
    fn test_empty_and_unknown_tags_are_unset() {
        assert_eq!(ActivityStatus::from_tag(""), None);
        assert_eq!(ActivityStatus::from_tag("  "), None);
        assert_eq!(ActivityStatus::from_tag("DESCANSO"), None);
    }

    #[test]
    fn test_assignment_drops_blank_slots() {
        let json = r#"{
            "employee_id": "emp-1",
            "employee_name": "Ana",
            "date": "2025-03-10",
            "slots": {"09:00": "TRABAJO", "09:30": "", "10:00": "BAJA MÉDICA"}
        }"#;

        let assignment: ActivityAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.slots.len(), 2);
        assert_eq!(assignment.slots["09:00"], ActivityStatus::Trabajo);
        assert_eq!(assignment.slots["10:00"], ActivityStatus::BajaMedica);
    }

    #[test]
    fn test_slot_update_clear() {
        let update = SlotUpdate {
            employee_id: "emp-1".into(),
            slot: "09:00".into(),
            status: "".into(),
        };
        assert!(update.is_clear());
        assert_eq!(update.parsed_status(), None);
    }
}
