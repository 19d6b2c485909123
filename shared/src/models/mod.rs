//! Domain models exchanged with the external record store

pub mod activity;
pub mod history;
pub mod store;
pub mod traffic;

pub use activity::{ActivityAssignment, ActivityStatus, SlotUpdate};
pub use history::HistoricalConfig;
pub use store::StoreParams;
pub use traffic::{AggregatedTraffic, DaySample, HourCounts, HourlyProfile, weekday_name};
