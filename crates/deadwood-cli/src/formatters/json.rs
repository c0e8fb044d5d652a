//! JSON formatter for analysis reports.

use anyhow::{Context, Result};
use deadwood_core::AnalysisReport;
use serde_json::json;

pub struct JsonFormatter;

pub fn render_json(report: &AnalysisReport) -> Result<String> {
    // Add the kind to each finding next to its type tag
    let findings = report
        .findings
        .iter()
        .map(|f| {
            let mut finding_json = serde_json::to_value(f)?;
            if let Some(obj) = finding_json.as_object_mut() {
                obj.insert("kind".to_string(), json!(f.kind()));
            }
            Ok(finding_json)
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()
        .context("Failed to serialize findings")?;

    let json_result = json!({
        "project_root": report.project_root,
        "findings": findings,
        "directories": report.directories,
        "statistics": report.statistics,
        "errors": report.errors,
    });

    let mut out =
        serde_json::to_string_pretty(&json_result).context("Failed to serialize report")?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadwood_core::{CharCount, FileRecord, Finding, Statistics};
    use serde_json::Value;
    use std::path::PathBuf;

    fn report() -> AnalysisReport {
        AnalysisReport {
            project_root: PathBuf::from("/project"),
            findings: vec![
                Finding::EmptyFile {
                    file: FileRecord {
                        path: "src/a.ts".to_string(),
                        name: "a.ts".to_string(),
                        size_bytes: 0,
                        extension: ".ts".to_string(),
                        char_count: CharCount::Counted(0),
                        is_empty: true,
                    },
                },
                Finding::KnownPathMissing {
                    path: "src/lib/supabase.ts".to_string(),
                },
            ],
            directories: vec![],
            statistics: Statistics {
                total_files: 1,
                ..Default::default()
            },
            errors: vec![],
        }
    }

    #[test]
    fn test_findings_carry_type_and_kind() {
        let value: Value = serde_json::from_str(&render_json(&report()).unwrap()).unwrap();
        let findings = value["findings"].as_array().unwrap();

        assert_eq!(findings[0]["type"], "EmptyFile");
        assert_eq!(findings[0]["kind"], "empty");
        assert_eq!(findings[0]["file"]["path"], "src/a.ts");
        assert_eq!(findings[0]["file"]["char_count"]["counted"], 0);
        assert_eq!(findings[1]["type"], "KnownPathMissing");
        assert_eq!(findings[1]["kind"], "known_paths");
    }

    #[test]
    fn test_report_sections_present() {
        let value: Value = serde_json::from_str(&render_json(&report()).unwrap()).unwrap();

        assert_eq!(value["project_root"], "/project");
        assert_eq!(value["statistics"]["total_files"], 1);
        assert!(value["directories"].as_array().unwrap().is_empty());
        assert!(value["errors"].as_array().unwrap().is_empty());
    }
}
