//! Orphan analysis: folds the file inventory into ordered findings.
//!
//! Findings are content- and allowlist-based:
//!
//! - every empty or small file yields [`Finding::EmptyFile`];
//! - a directory with more than [`SUSPICIOUS_DIR_MIN_FILES`] files, all empty or
//!   small, yields [`Finding::SuspiciousDirectory`]. The project root is never a
//!   candidate;
//! - every allowlisted path yields [`Finding::KnownPathPresent`] or
//!   [`Finding::KnownPathMissing`] depending on whether it exists.
//!
//! The reference graph does not suppress or raise findings; only its size is
//! reported.

use crate::graph::ReferenceGraph;
use crate::types::{
    DirectorySummary, FileRecord, Finding, KnownUsedSet, ScanOptions, Statistics,
};
use std::collections::BTreeMap;

/// A directory must hold strictly more files than this to be flagged.
pub const SUSPICIOUS_DIR_MIN_FILES: usize = 3;

/// Number of files listed per directory in the summary sample.
pub const DIRECTORY_SAMPLE_SIZE: usize = 3;

/// Output of [`OrphanAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Findings in kind order: empty files, suspicious directories, known paths.
    pub findings: Vec<Finding>,

    /// Summaries for every non-root directory, sorted by path.
    pub directories: Vec<DirectorySummary>,

    /// Totals; `duration_ms` is left for the caller to fill in.
    pub statistics: Statistics,
}

/// Classifies files and directories as empty, suspicious, or allowlisted.
#[derive(Debug, Clone)]
pub struct OrphanAnalyzer {
    small_file_threshold: usize,
    known_used: KnownUsedSet,
}

impl OrphanAnalyzer {
    pub fn new(small_file_threshold: usize, known_used: KnownUsedSet) -> Self {
        Self {
            small_file_threshold,
            known_used,
        }
    }

    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(options.small_file_threshold, options.known_used.clone())
    }

    /// Analyzes `records` (in traversal order).
    ///
    /// `path_exists` answers whether a project-relative path exists under the root;
    /// it is consulted once per allowlisted path.
    pub fn analyze<F>(
        &self,
        records: &[FileRecord],
        graph: &ReferenceGraph,
        path_exists: F,
    ) -> Analysis
    where
        F: Fn(&str) -> bool,
    {
        let threshold = self.small_file_threshold;
        let mut findings = Vec::new();

        for record in records.iter().filter(|r| r.is_empty_or_small(threshold)) {
            findings.push(Finding::EmptyFile {
                file: record.clone(),
            });
        }

        let directories = self.summarize_directories(records);
        for dir in directories.iter().filter(|d| d.suspicious) {
            findings.push(Finding::SuspiciousDirectory {
                path: dir.path.clone(),
                file_count: dir.file_count,
            });
        }

        for path in self.known_used.iter() {
            let finding = if path_exists(path) {
                Finding::KnownPathPresent {
                    path: path.to_string(),
                }
            } else {
                Finding::KnownPathMissing {
                    path: path.to_string(),
                }
            };
            findings.push(finding);
        }

        let statistics = Statistics {
            total_files: records.len(),
            code_files: records
                .iter()
                .filter(|r| r.char_count.as_count().is_some() || r.char_count.is_unreadable())
                .count(),
            empty_files: records
                .iter()
                .filter(|r| r.is_empty_or_small(threshold))
                .count(),
            suspicious_directories: directories.iter().filter(|d| d.suspicious).count(),
            referenced_identities: graph.len(),
            unreadable_files: records.iter().filter(|r| r.char_count.is_unreadable()).count(),
            duration_ms: 0,
        };

        Analysis {
            findings,
            directories,
            statistics,
        }
    }

    /// Groups records by parent directory, skipping the project root.
    ///
    /// Ancestors that hold only subdirectories get a summary with no files.
    fn summarize_directories(&self, records: &[FileRecord]) -> Vec<DirectorySummary> {
        let mut groups: BTreeMap<&str, Vec<&FileRecord>> = BTreeMap::new();
        for record in records {
            let dir = record.directory();
            if dir.is_empty() {
                continue;
            }
            let mut ancestor = dir;
            while let Some((parent, _)) = ancestor.rsplit_once('/') {
                groups.entry(parent).or_default();
                ancestor = parent;
            }
            groups.entry(dir).or_default().push(record);
        }

        groups
            .into_iter()
            .map(|(path, files)| {
                let small_files: Vec<FileRecord> = files
                    .iter()
                    .filter(|r| r.is_empty_or_small(self.small_file_threshold))
                    .map(|r| (*r).clone())
                    .collect();
                let suspicious = files.len() > SUSPICIOUS_DIR_MIN_FILES
                    && small_files.len() == files.len();

                DirectorySummary {
                    path: path.to_string(),
                    file_count: files.len(),
                    total_bytes: files.iter().map(|r| r.size_bytes).sum(),
                    sample: files
                        .iter()
                        .take(DIRECTORY_SAMPLE_SIZE)
                        .map(|r| (*r).clone())
                        .collect(),
                    small_files,
                    suspicious,
                }
            })
            .collect()
    }
}
