//! Analysis orchestration logic.

use crate::formatters::{self, Formatter};
use anyhow::{Context, Result};
use deadwood_config::ConfigOverrides;
use deadwood_core::AnalysisReport;
use deadwood_fs::NativeFileSystem;
use deadwood_scan::Scanner;
use std::path::PathBuf;
use tracing::debug;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Options for running analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRunOptions {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub format: OutputFormat,
}

/// Scans the project and returns the report without printing it.
pub fn analyze(options: &AnalysisRunOptions) -> Result<AnalysisReport> {
    // Step 1: Validate the project root
    let project_root = deadwood_config::validate_project_path(&options.root)?;
    debug!(root = %project_root.display(), "project root validated");

    // Step 2: Scope a read-only filesystem to it
    let fs = NativeFileSystem::new(&project_root)
        .with_context(|| format!("Failed to open {}", project_root.display()))?;

    // Step 3: Resolve configuration
    let scan_options =
        deadwood_config::load_scan_options(&fs, options.config.as_deref(), &options.overrides)
            .context("Failed to load configuration")?;

    // Step 4: Scan
    let scanner = Scanner::new(scan_options).context("Failed to build import patterns")?;
    scanner.scan(&fs).context("Analysis failed")
}

/// Runs the analysis and prints the report.
pub fn run_analysis(options: &AnalysisRunOptions) -> Result<()> {
    let report = analyze(options)?;

    match options.format {
        OutputFormat::Json => formatters::JsonFormatter.format(&report),
        OutputFormat::Human => formatters::HumanFormatter.format(&report),
    }
}
