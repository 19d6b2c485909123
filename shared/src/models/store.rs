//! Store parameter model
//!
//! Every field is optional at the wire: the record store tolerates
//! half-filled store records, so defaults are applied on read instead of
//! failing the whole day view over a missing parameter.

use serde::{Deserialize, Serialize};

/// Default target customers served per employee pair per hour
pub const DEFAULT_DESIRED_ATTENTION: f64 = 25.0;
/// Default growth factor (5%)
pub const DEFAULT_GROWTH_FACTOR: f64 = 0.05;

/// Parameters of one store as returned by the record store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreParams {
    /// Country name; `FRANCIA` selects 15-minute slot granularity
    #[serde(default)]
    pub country: Option<String>,
    /// Opening spec: single `HH:MM` or `start-end,start-end` interval list
    #[serde(default)]
    pub open_spec: Option<String>,
    /// Closing spec (`HH:MM`), ignored when `open_spec` is an interval list
    #[serde(default)]
    pub close_spec: Option<String>,
    /// Target customers served per employee pair per hour
    #[serde(default)]
    pub desired_attention: Option<f64>,
    /// Expected traffic growth over the reference period (0.05 = 5%)
    #[serde(default)]
    pub growth_factor: Option<f64>,
    /// Approved weekly contract hours for the whole store
    #[serde(default)]
    pub contract_hours_approved: Option<f64>,
    /// Whether this store compares against configured historical weeks
    #[serde(default)]
    pub historical: bool,
    /// Counter-system store code, when it differs from the record id
    #[serde(default)]
    pub traffic_code: Option<String>,
}

impl StoreParams {
    /// Desired attention with the documented default applied
    pub fn attention(&self) -> f64 {
        self.desired_attention.unwrap_or(DEFAULT_DESIRED_ATTENTION)
    }

    /// Growth factor with the documented default applied
    pub fn growth(&self) -> f64 {
        self.growth_factor.unwrap_or(DEFAULT_GROWTH_FACTOR)
    }

    /// Store code used against the traffic counter system
    pub fn code_or<'a>(&'a self, store_id: &'a str) -> &'a str {
        self.traffic_code.as_deref().unwrap_or(store_id)
    }
}
