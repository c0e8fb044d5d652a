//! Deadwood CLI library components.
//!
//! This crate provides the command-line interface for deadwood's orphan scan.
//! The main binary is in `main.rs`.

pub mod cli;
pub mod formatters;
pub mod logging;

// Re-export core types for convenience
pub use deadwood_core::{AnalysisReport, Finding, ScanOptions};
