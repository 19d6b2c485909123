//! Effective-hours accounting
//!
//! Work (`TRABAJO`) and training (`FORMACIÓN`) slots add one
//! granularity-hour each; medical leave (`BAJA MÉDICA`) subtracts one;
//! every other tag is neutral. A single employee's net hours may go
//! negative on partial data, so only the store-wide total is clamped.

use shared::models::ActivityAssignment;

/// Per-employee hour breakdown for one day
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeHours {
    /// Hours in `TRABAJO` or `FORMACIÓN` slots
    pub productive: f64,
    /// Hours in `BAJA MÉDICA` slots
    pub medical_leave: f64,
    /// `max(0, productive − contract) + medical_leave`, clamped to ≥ 0;
    /// `None` when the employee has no declared contract hours
    pub overtime: Option<f64>,
}

/// Net effective hours for the whole store on one day.
///
/// Sums every employee's productive-minus-medical-leave hours over the
/// given slot grid and clamps the grand total at zero.
pub fn total_effective_hours(
    assignments: &[ActivityAssignment],
    slots: &[String],
    granularity_hours: f64,
) -> f64 {
    let total: f64 = assignments
        .iter()
        .map(|assignment| {
            let hours = employee_hours(assignment, slots, granularity_hours);
            hours.productive - hours.medical_leave
        })
        .sum();
    total.max(0.0)
}

/// One employee's hour breakdown over the given slot grid.
///
/// Pure function of the employee's slot assignments and declared
/// contract hours; reads no store-wide state.
pub fn employee_hours(
    assignment: &ActivityAssignment,
    slots: &[String],
    granularity_hours: f64,
) -> EmployeeHours {
    let mut productive = 0.0;
    let mut medical_leave = 0.0;

    for slot in slots {
        if let Some(status) = assignment.slots.get(slot) {
            if status.is_productive() {
                productive += granularity_hours;
            } else if status.is_medical_leave() {
                medical_leave += granularity_hours;
            }
        }
    }

    let overtime = assignment
        .contract_hours
        .map(|contract| ((productive - contract).max(0.0) + medical_leave).max(0.0));

    EmployeeHours {
        productive,
        medical_leave,
        overtime,
    }
}
