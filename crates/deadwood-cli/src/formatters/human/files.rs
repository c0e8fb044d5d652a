//! Empty file and suspicious directory listings.

use super::write_limited;
use colored::*;
use deadwood_core::{FileRecord, Finding};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use Finding::*;

/// Files listed per extension group before truncating.
const FILES_PER_EXTENSION: usize = 5;

pub fn write_empty_files(out: &mut String, findings: &[&Finding]) -> fmt::Result {
    let mut by_extension: BTreeMap<&str, Vec<&FileRecord>> = BTreeMap::new();
    for finding in findings {
        if let EmptyFile { file } = finding {
            by_extension
                .entry(file.extension.as_str())
                .or_default()
                .push(file);
        }
    }

    writeln!(
        out,
        "\n{} ({}):",
        "⚠️  Empty or small files".yellow().bold(),
        findings.len()
    )?;

    for (ext, files) in &by_extension {
        let label = if ext.is_empty() { "(no extension)" } else { *ext };
        writeln!(out, "   📁 {} ({} files):", label, files.len())?;
        write_limited(out, files, FILES_PER_EXTENSION, "      ", |file| {
            file.path.clone()
        })?;
    }
    Ok(())
}

pub fn write_suspicious(out: &mut String, findings: &[&Finding]) -> fmt::Result {
    writeln!(
        out,
        "\n{} ({}):",
        "🚨 Suspicious directories".red().bold(),
        findings.len()
    )?;
    for finding in findings {
        if let SuspiciousDirectory { path, file_count } = finding {
            writeln!(
                out,
                "   📁 {}/ ({} files, all empty or small)",
                path, file_count
            )?;
        }
    }
    Ok(())
}
