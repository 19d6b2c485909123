//! Cuadrante backend: traffic-driven staffing for retail stores
//!
//! The service aggregates hourly footfall/ticket/revenue counters into
//! weekly comparables, resolves a store's historical comparison mode,
//! and turns the resulting traffic profile into per-hour staffing
//! recommendations. The shift-grid side computes effective hours and
//! per-employee overtime from the day's activity assignments.

pub mod api;
pub mod core;
pub mod records;
pub mod schedule;
pub mod staffing;
pub mod traffic;
pub mod utils;

pub use crate::core::{AppState, Config, Server};
