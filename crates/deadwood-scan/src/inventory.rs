//! File inventory: one [`FileRecord`] per file that survives directory pruning.
//!
//! Code files are read once; their text is handed to a visitor so import
//! extraction happens in the same pass. Per-file failures never stop the walk:
//! they are recorded on the file and in the inventory's error list.

use deadwood_core::{CharCount, ErrorSeverity, FileError, FileRecord, ScanOptions};
use deadwood_fs::{DiscoveryOptions, FileSystem};
use std::io;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Files of one project tree, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInventory {
    records: Vec<FileRecord>,
    errors: Vec<FileError>,
}

/// Result of inspecting a single file.
#[derive(Debug)]
pub struct InspectedFile {
    pub record: FileRecord,
    /// Decoded text, for code files that could be read.
    pub text: Option<String>,
    pub errors: Vec<FileError>,
}

impl FileInventory {
    /// Walk `fs`, calling `visit` with every code file's record and text.
    pub fn collect<F, V>(fs: &F, options: &ScanOptions, mut visit: V) -> Self
    where
        F: FileSystem,
        V: FnMut(&FileRecord, &str),
    {
        let mut inventory = Self::default();

        for entry in fs.walk_files(&discovery_options(options)) {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    let path = err.path.as_deref().map(slash_path).unwrap_or_default();
                    warn!(path = %path, error = %err, "skipping unreadable entry");
                    inventory.errors.push(FileError {
                        path,
                        message: err.message,
                        severity: ErrorSeverity::Error,
                    });
                    continue;
                }
            };

            let inspected = inspect_file(fs, &path, options);
            if let Some(text) = &inspected.text {
                visit(&inspected.record, text);
            }
            inventory.errors.extend(inspected.errors);
            inventory.records.push(inspected.record);
        }

        inventory
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn errors(&self) -> &[FileError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_parts(self) -> (Vec<FileRecord>, Vec<FileError>) {
        (self.records, self.errors)
    }
}

/// Build the record for one project-relative file.
///
/// Emptiness is judged on the trimmed text, so whitespace-only files are empty.
/// Files outside the code-extension set are never read and never empty, and a
/// code file that cannot be decoded is recorded as unreadable, not empty.
pub fn inspect_file<F: FileSystem>(fs: &F, path: &Path, options: &ScanOptions) -> InspectedFile {
    let rel = slash_path(path);
    let mut errors = Vec::new();

    let size_bytes = match fs.metadata(path) {
        Ok(meta) => meta.size,
        Err(err) => {
            warn!(path = %rel, error = %err, "cannot stat file");
            errors.push(FileError {
                path: rel.clone(),
                message: format!("cannot stat: {}", err),
                severity: ErrorSeverity::Warning,
            });
            0
        }
    };

    let extension = extension_of(path);
    let (char_count, text) = if options.is_code_extension(&extension) {
        match fs.read_to_string(path) {
            Ok(text) => (CharCount::Counted(text.trim().chars().count()), Some(text)),
            Err(err) => {
                let reason = read_failure(&err);
                warn!(path = %rel, error = %err, "cannot read file as text");
                errors.push(FileError {
                    path: rel.clone(),
                    message: reason.clone(),
                    severity: ErrorSeverity::Warning,
                });
                (CharCount::Unreadable(reason), None)
            }
        }
    } else {
        (CharCount::NotApplicable, None)
    };

    let is_empty = char_count.as_count() == Some(0);
    debug!(path = %rel, size = size_bytes, chars = %char_count, "inventoried");

    let record = FileRecord {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| rel.clone()),
        path: rel,
        size_bytes,
        extension,
        char_count,
        is_empty,
    };

    InspectedFile {
        record,
        text,
        errors,
    }
}

pub(crate) fn discovery_options(options: &ScanOptions) -> DiscoveryOptions {
    DiscoveryOptions {
        ignored_dirs: options.ignored_dirs.clone(),
        respect_gitignore: options.respect_gitignore,
        ..Default::default()
    }
}

/// Project-relative path with `/` separators on every platform.
pub(crate) fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Extension with its leading dot, or empty.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn read_failure(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::InvalidData => "not valid UTF-8".to_string(),
        _ => format!("cannot read: {}", err),
    }
}
