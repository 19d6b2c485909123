//! Traffic aggregation and historical comparison

pub mod aggregate;
pub mod fetch;
pub mod historical;

pub use aggregate::aggregate_week;
pub use historical::resolve_day_traffic;
