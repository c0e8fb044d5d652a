//! Human-readable formatter for analysis reports.

mod directories;
mod files;
mod known;


use colored::*;
use deadwood_core::{AnalysisReport, FindingKind};
use std::fmt::{self, Write};

pub struct HumanFormatter;

const RULE_WIDTH: usize = 80;

pub fn render(report: &AnalysisReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{} {}", "Scanning project:".bold(), report.project_root.display())?;
    writeln!(out, "{}", rule)?;

    directories::write_directories(&mut out, report)?;

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", "Deadwood Analysis Results".bold())?;
    writeln!(out, "{}", rule)?;

    write_statistics(&mut out, report)?;

    let empty: Vec<_> = report.findings_of(FindingKind::Empty).collect();
    if !empty.is_empty() {
        files::write_empty_files(&mut out, &empty)?;
    }

    let suspicious: Vec<_> = report.findings_of(FindingKind::Suspicious).collect();
    if !suspicious.is_empty() {
        files::write_suspicious(&mut out, &suspicious)?;
    }

    let known: Vec<_> = report.findings_of(FindingKind::KnownPaths).collect();
    if !known.is_empty() {
        known::write_known_paths(&mut out, &known)?;
    }

    if !report.errors.is_empty() {
        writeln!(out, "\n{} ({}):", "Recovered errors".yellow().bold(), report.errors.len())?;
        for error in &report.errors {
            writeln!(out, "  {} {}: {}", "!".yellow(), error.path, error.message)?;
        }
    }

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", "Analysis complete".green().bold())?;
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "\nThis report is informational only: nothing was deleted or modified."
    )?;

    Ok(out)
}

fn write_statistics(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    let stats = &report.statistics;

    writeln!(out, "\n{}", "Statistics:".bold())?;
    writeln!(out, "  Total files: {}", stats.total_files)?;
    writeln!(out, "  Code files: {}", stats.code_files)?;
    writeln!(out, "  Empty or small files: {}", stats.empty_files)?;
    writeln!(out, "  Suspicious directories: {}", stats.suspicious_directories)?;
    writeln!(out, "  Referenced identities: {}", stats.referenced_identities)?;
    if stats.unreadable_files > 0 {
        writeln!(out, "  Unreadable files: {}", stats.unreadable_files)?;
    }
    writeln!(out, "  Duration: {}ms", stats.duration_ms)
}

/// Writes up to `limit` lines, then "... and N more".
pub(crate) fn write_limited<T>(
    out: &mut String,
    items: &[T],
    limit: usize,
    indent: &str,
    mut line: impl FnMut(&T) -> String,
) -> fmt::Result {
    for item in items.iter().take(limit) {
        writeln!(out, "{}- {}", indent, line(item))?;
    }
    if items.len() > limit {
        writeln!(out, "{}... and {} more", indent, items.len() - limit)?;
    }
    Ok(())
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
