//! Per-directory summaries.

use super::format_bytes;
use colored::*;
use deadwood_core::{AnalysisReport, DirectorySummary, FileRecord};
use std::fmt::{self, Write};

pub fn write_directories(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    for dir in &report.directories {
        write_directory(out, dir)?;
    }
    Ok(())
}

fn write_directory(out: &mut String, dir: &DirectorySummary) -> fmt::Result {
    writeln!(out, "\n📁 {}/", dir.path.cyan())?;
    writeln!(
        out,
        "   {} files | {} total",
        dir.file_count,
        format_bytes(dir.total_bytes)
    )?;

    if !dir.small_files.is_empty() {
        writeln!(
            out,
            "   {} {} empty or small files:",
            "⚠️ ".yellow(),
            dir.small_files.len()
        )?;
        for file in &dir.small_files {
            writeln!(out, "      - {} ({} chars)", file.name, file.char_count)?;
        }
    }

    if dir.suspicious {
        return writeln!(
            out,
            "   {} {}",
            "🚨".red(),
            "SUSPICIOUS: every file is empty or small".red().bold()
        );
    }

    if dir.sample.is_empty() {
        return Ok(());
    }

    writeln!(out, "   Files:")?;
    for file in &dir.sample {
        writeln!(
            out,
            "      - {} ({}, {})",
            file.name,
            format_bytes(file.size_bytes),
            status(file)
        )?;
    }
    let hidden = dir.file_count.saturating_sub(dir.sample.len());
    if hidden > 0 {
        writeln!(out, "      ... and {} more", hidden)?;
    }
    Ok(())
}

fn status(file: &FileRecord) -> String {
    if file.is_empty {
        return "empty".to_string();
    }
    match file.char_count.as_count() {
        Some(n) => format!("{} chars", n),
        None => file.char_count.to_string(),
    }
}
