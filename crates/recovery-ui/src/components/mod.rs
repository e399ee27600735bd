//! Small line-oriented widgets shared by the views.

pub mod header;
pub mod indicators;
