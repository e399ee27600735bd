//! Data ingestion layer for the recovery charts.
//!
//! Reads the daily-change CSV into validated records, filters them by state
//! and groups them into per-month totals.

pub mod aggregator;
pub mod reader;

pub use recovery_core as core;
