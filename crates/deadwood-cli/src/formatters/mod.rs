//! Output formatters for deadwood reports.

pub mod human;
pub mod json;

use anyhow::Result;
use deadwood_core::AnalysisReport;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Trait for formatting analysis reports
pub trait Formatter {
    /// Render the report as text
    fn render(&self, report: &AnalysisReport) -> Result<String>;

    /// Render and print the report to stdout
    fn format(&self, report: &AnalysisReport) -> Result<()> {
        print!("{}", self.render(report)?);
        Ok(())
    }
}

impl Formatter for HumanFormatter {
    fn render(&self, report: &AnalysisReport) -> Result<String> {
        Ok(human::render(report)?)
    }
}

impl Formatter for JsonFormatter {
    fn render(&self, report: &AnalysisReport) -> Result<String> {
        json::render_json(report)
    }
}
