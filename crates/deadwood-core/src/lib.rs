//! deadwood core - import graph and orphan analysis.
//!
//! This crate holds everything that does not touch the filesystem:
//!
//! - [`PathNormalizer`]: maps raw import specifiers to project-relative identities
//! - [`ImportExtractor`]: finds import-like constructs in source text
//! - [`ReferenceGraph`]: the set of identities referenced anywhere
//! - [`OrphanAnalyzer`]: folds file records into ordered [`Finding`]s
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  deadwood-cli   │  (argument parsing, report formatting)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  deadwood-scan  │  (file inventory, single-pass scan)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  deadwood-core  │  (this crate)
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use deadwood_core::{ImportExtractor, PathNormalizer, ReferenceGraph};
//!
//! let extractor = ImportExtractor::new()?;
//! let normalizer = PathNormalizer::default();
//!
//! let text = "import Button from '../components/atoms/Button';";
//! let graph: ReferenceGraph = extractor
//!     .extract(text)
//!     .iter()
//!     .filter_map(|spec| normalizer.normalize(spec, "src/pages/HubScreen.tsx"))
//!     .collect();
//!
//! assert!(graph.contains("src/components/atoms/Button"));
//! # Ok::<(), deadwood_core::Error>(())
//! ```

pub mod analyzer;
pub mod error;
pub mod extract;
pub mod graph;
pub mod normalize;
pub mod types;

pub use analyzer::{Analysis, OrphanAnalyzer};
pub use error::{Error, Result};
pub use extract::{ImportExtractor, ImportSyntax, PatternSyntax, SpecifierOccurrence, SyntaxKind};
pub use graph::ReferenceGraph;
pub use normalize::PathNormalizer;
pub use types::{
    AliasRule, AnalysisReport, CharCount, DirectorySummary, ErrorSeverity, FileError, FileRecord,
    Finding, FindingKind, KnownUsedSet, ResolvedIdentity, ScanOptions, Statistics,
    DEFAULT_ALIAS_BASE, DEFAULT_ALIAS_PREFIX, DEFAULT_CODE_EXTENSIONS, DEFAULT_IGNORED_DIRS,
    DEFAULT_KNOWN_USED, DEFAULT_SMALL_FILE_THRESHOLD,
};
