//! Core data types for deadwood analysis.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Trimmed character count below which a code file is reported as "small".
pub const DEFAULT_SMALL_FILE_THRESHOLD: usize = 50;

/// Extensions (with the leading dot) whose contents are read and scanned for imports.
pub const DEFAULT_CODE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js", ".css", ".scss"];

/// Directory names that are never descended into.
///
/// These cover dependency caches, build outputs, editor state and VCS metadata.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    ".vscode",
    "__pycache__",
    ".pytest_cache",
];

/// Default alias prefix and the base directory it expands to.
pub const DEFAULT_ALIAS_PREFIX: &str = "@/";
pub const DEFAULT_ALIAS_BASE: &str = "src/";

/// Paths the project is known to use, checked against the tree on every run.
pub const DEFAULT_KNOWN_USED: &[&str] = &[
    "src/components/atoms/Button",
    "src/components/templates/MobileScreenLayout",
    "src/pages/SplashScreen.tsx",
    "src/pages/LoginScreen.tsx",
    "src/pages/HubScreen.tsx",
    "src/pages/ProductosScreen.tsx",
    "src/lib/supabase.ts",
];

/// User-facing grouping for findings.
///
/// The order of [`FindingKind::all`] is the order findings are emitted and printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Empty or near-empty files
    Empty,
    /// Directories where every file is empty or small
    Suspicious,
    /// Allowlist presence check
    KnownPaths,
}

impl FindingKind {
    /// Returns all kinds in emission order
    pub fn all() -> &'static [FindingKind] {
        &[
            FindingKind::Empty,
            FindingKind::Suspicious,
            FindingKind::KnownPaths,
        ]
    }

    /// Returns the display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            FindingKind::Empty => "Empty or small files",
            FindingKind::Suspicious => "Suspicious directories",
            FindingKind::KnownPaths => "Known-used paths",
        }
    }

    /// Returns the description for this kind
    pub fn description(&self) -> &'static str {
        match self {
            FindingKind::Empty => "Files whose trimmed content is empty or below the size threshold",
            FindingKind::Suspicious => "Directories with more than 3 files, all of them empty or small",
            FindingKind::KnownPaths => "Allowlisted paths and whether they still exist",
        }
    }
}

/// Character count of a file's trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharCount {
    /// Number of characters after stripping leading and trailing whitespace.
    Counted(usize),
    /// The file is not a code file, so its text was never read.
    NotApplicable,
    /// The file could not be read as text.
    Unreadable(String),
}

impl CharCount {
    /// Returns the counted characters, if the text was read.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            CharCount::Counted(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, CharCount::Unreadable(_))
    }
}

impl fmt::Display for CharCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharCount::Counted(n) => write!(f, "{}", n),
            CharCount::NotApplicable => f.write_str("n/a"),
            CharCount::Unreadable(_) => f.write_str("unreadable"),
        }
    }
}

/// Metadata for one file in the project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Project-relative path, `/`-separated.
    pub path: String,

    /// Base file name.
    pub name: String,

    /// Size on disk in bytes.
    pub size_bytes: u64,

    /// Extension including the leading dot, or empty.
    pub extension: String,

    /// Trimmed character count, when applicable.
    pub char_count: CharCount,

    /// Whether the trimmed text has zero length.
    pub is_empty: bool,
}

impl FileRecord {
    /// Project-relative directory containing this file; empty for the project root.
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// Whether the file was read and its trimmed text is shorter than `threshold`.
    pub fn is_small(&self, threshold: usize) -> bool {
        self.char_count.as_count().is_some_and(|n| n < threshold)
    }

    /// Whether the file counts toward the empty/small listing.
    pub fn is_empty_or_small(&self, threshold: usize) -> bool {
        self.is_empty || self.is_small(threshold)
    }
}

/// Canonical project-relative key an import specifier resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedIdentity(String);

impl ResolvedIdentity {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResolvedIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Alias prefix substitution applied to import specifiers (e.g. `@/` -> `src/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub prefix: String,
    pub base: String,
}

impl Default for AliasRule {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            base: DEFAULT_ALIAS_BASE.to_string(),
        }
    }
}

/// Hand-curated set of project-relative paths assumed to be in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownUsedSet(BTreeSet<String>);

impl KnownUsedSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    /// Paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for KnownUsedSet {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWN_USED.iter().copied())
    }
}

/// One result of the orphan analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Finding {
    /// A file whose trimmed content is empty or below the small-file threshold.
    EmptyFile {
        file: FileRecord,
    },

    /// A directory with more than 3 files where every file is empty or small.
    SuspiciousDirectory {
        /// Project-relative directory path.
        path: String,
        file_count: usize,
    },

    /// An allowlisted path that no longer exists under the project root.
    KnownPathMissing {
        path: String,
    },

    /// An allowlisted path that exists under the project root.
    KnownPathPresent {
        path: String,
    },
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        use Finding::*;
        match self {
            EmptyFile { .. } => FindingKind::Empty,
            SuspiciousDirectory { .. } => FindingKind::Suspicious,
            KnownPathMissing { .. } | KnownPathPresent { .. } => FindingKind::KnownPaths,
        }
    }
}

/// Per-directory summary used by the human-readable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    /// Project-relative directory path.
    pub path: String,

    pub file_count: usize,

    pub total_bytes: u64,

    /// Files in this directory that are empty or small.
    pub small_files: Vec<FileRecord>,

    /// First few files of the directory, in traversal order.
    pub sample: Vec<FileRecord>,

    /// Whether this directory produced a `SuspiciousDirectory` finding.
    pub suspicious: bool,
}

/// Summary statistics from a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Every file that survived directory filtering.
    pub total_files: usize,

    /// Files whose extension is in the code-extension set.
    pub code_files: usize,

    /// Files that are empty or below the small-file threshold.
    pub empty_files: usize,

    pub suspicious_directories: usize,

    /// Distinct identities in the reference graph.
    pub referenced_identities: usize,

    /// Code files that could not be read as text.
    pub unreadable_files: usize,

    /// Wall-clock duration of the scan and analysis.
    pub duration_ms: u64,
}

/// A per-file failure recovered during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// Project-relative path of the file or directory.
    pub path: String,

    pub message: String,

    pub severity: ErrorSeverity,
}

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// The file was recorded, but some metadata is missing.
    Warning,

    /// The file or directory was skipped.
    Error,
}

/// Complete output of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_root: PathBuf,

    /// Findings grouped by kind, in [`FindingKind::all`] order.
    pub findings: Vec<Finding>,

    /// Per-directory summaries, project root excluded.
    pub directories: Vec<DirectorySummary>,

    pub statistics: Statistics,

    /// Non-fatal failures.
    #[serde(default)]
    pub errors: Vec<FileError>,
}

impl AnalysisReport {
    /// Findings of one kind, in emission order.
    pub fn findings_of(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind() == kind)
    }
}

/// Options controlling a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory names pruned during traversal.
    pub ignored_dirs: BTreeSet<String>,

    /// Extensions (with the leading dot) scanned for imports.
    pub code_extensions: BTreeSet<String>,

    pub alias: AliasRule,

    pub small_file_threshold: usize,

    pub known_used: KnownUsedSet,

    /// Also honor `.gitignore` files while walking.
    pub respect_gitignore: bool,
}

impl ScanOptions {
    /// Whether `extension` (with the leading dot) belongs to the code set.
    pub fn is_code_extension(&self, extension: &str) -> bool {
        self.code_extensions.contains(extension)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            code_extensions: DEFAULT_CODE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            alias: AliasRule::default(),
            small_file_threshold: DEFAULT_SMALL_FILE_THRESHOLD,
            known_used: KnownUsedSet::default(),
            respect_gitignore: false,
        }
    }
}
