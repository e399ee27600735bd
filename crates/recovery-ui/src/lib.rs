//! Terminal UI layer for the recovery charts.
//!
//! Provides themes, the header and refresh indicator components, the bar
//! chart view, and the main application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use recovery_core as core;
