//! Core domain types for the recovery charts.
//!
//! Daily records, month keys and ordered monthly totals, the month-name
//! mapping, chart configuration, CLI settings, errors and small formatting
//! and timezone helpers shared by every other crate in the workspace.

pub mod chart_config;
pub mod error;
pub mod formatting;
pub mod models;
pub mod months;
pub mod settings;
pub mod time_utils;
