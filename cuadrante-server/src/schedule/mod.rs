//! Shift-grid core: slot generation, effective hours, week identifiers

pub mod effective_hours;
pub mod slots;
pub mod weeks;

pub use effective_hours::{EmployeeHours, employee_hours, total_effective_hours};
pub use slots::{generate_slots, granularity_hours, granularity_minutes};
pub use weeks::{monday_of, week_dates, week_of};
