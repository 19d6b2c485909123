//! External record-store collaborators
//!
//! The core never talks to the record store directly; it goes through
//! these four traits. Production uses [`http::RecordStoreClient`] for
//! all of them, tests substitute in-memory fakes.

pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::AppResult;
use shared::models::{ActivityAssignment, DaySample, HistoricalConfig, SlotUpdate, StoreParams};
use std::collections::BTreeMap;

/// Store parameter lookup
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    /// Parameters for one store; fields may be missing and are
    /// defaulted on read.
    async fn store_params(&self, store_id: &str) -> AppResult<StoreParams>;
}

/// Historical comparison configuration lookup
#[async_trait]
pub trait HistoryConfigSource: Send + Sync {
    /// Configuration for one store and one exact target week, `None`
    /// when the week has no entry.
    async fn config_for_week(
        &self,
        store_id: &str,
        week_id: &str,
    ) -> AppResult<Option<HistoricalConfig>>;
}

/// Raw traffic counter fetch
#[async_trait]
pub trait TrafficSource: Send + Sync {
    /// One date's sample; `None` when the counter system has no data
    /// for that date.
    async fn fetch_day(&self, store_code: &str, date: NaiveDate) -> AppResult<Option<DaySample>>;

    /// Bulk variant over a date list; dates without data are absent
    /// from the result.
    async fn fetch_days(
        &self,
        store_code: &str,
        dates: &[NaiveDate],
    ) -> AppResult<BTreeMap<NaiveDate, DaySample>>;
}

/// Activity grid read/update
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// All employees' assignments for one store and day
    async fn day_assignments(
        &self,
        store_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ActivityAssignment>>;

    /// Set one employee's one slot (or clear it with an empty status)
    async fn set_slot(&self, store_id: &str, date: NaiveDate, update: &SlotUpdate)
    -> AppResult<()>;
}
