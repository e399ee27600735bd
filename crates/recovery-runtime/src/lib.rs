//! Runtime layer for the recovery charts.
//!
//! Wires the data layer into a stateless refresh pipeline and runs it in the
//! background whenever a refresh is requested.

pub mod orchestrator;
pub mod pipeline;

pub use recovery_core as core;
pub use recovery_data as data;
