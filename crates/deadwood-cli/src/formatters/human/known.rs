//! Known-used path check.

use colored::*;
use deadwood_core::Finding;
use std::fmt::{self, Write};

pub fn write_known_paths(out: &mut String, findings: &[&Finding]) -> fmt::Result {
    writeln!(out, "\n{}", "✅ Known-used paths:".green().bold())?;
    for finding in findings {
        match finding {
            Finding::KnownPathPresent { path } => {
                writeln!(out, "   {} {}", "✓".green(), path)?;
            }
            Finding::KnownPathMissing { path } => {
                writeln!(out, "   {} {} {}", "✗".red(), path, "(missing)".red())?;
            }
            _ => {}
        }
    }
    Ok(())
}
