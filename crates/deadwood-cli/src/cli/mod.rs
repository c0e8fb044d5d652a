//! Command-line orchestration.

pub mod analysis;
