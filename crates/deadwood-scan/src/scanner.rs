//! Single-pass scan: inventory, extraction, normalization, then analysis.

use crate::inventory::FileInventory;
use deadwood_core::{
    AnalysisReport, Error, ImportExtractor, OrphanAnalyzer, PathNormalizer, ReferenceGraph,
    Result, ScanOptions,
};
use deadwood_fs::FileSystem;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Orphan scanner for one configuration.
///
/// # Examples
///
/// ```
/// use deadwood_core::{FindingKind, ScanOptions};
/// use deadwood_fs::MemoryFileSystem;
/// use deadwood_scan::Scanner;
///
/// let fs = MemoryFileSystem::new("/project")
///     .with_file("src/main.ts", "import { supabase } from './lib/supabase';")
///     .with_file("src/lib/supabase.ts", "");
///
/// let scanner = Scanner::new(ScanOptions::default())?;
/// let report = scanner.scan(&fs)?;
///
/// assert_eq!(report.statistics.total_files, 2);
/// assert_eq!(report.statistics.referenced_identities, 1);
/// // Both files are below the 50-character threshold
/// assert_eq!(report.findings_of(FindingKind::Empty).count(), 2);
/// # Ok::<(), deadwood_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Scanner {
    options: ScanOptions,
    extractor: ImportExtractor,
    normalizer: PathNormalizer,
    analyzer: OrphanAnalyzer,
}

impl Scanner {
    /// Create a scanner with the built-in import syntaxes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if an import pattern fails to compile, or
    /// [`Error::InvalidConfig`] if the options cannot drive a scan.
    pub fn new(options: ScanOptions) -> Result<Self> {
        Self::with_extractor(options, ImportExtractor::new()?)
    }

    /// Create a scanner with a custom set of import syntaxes.
    pub fn with_extractor(options: ScanOptions, extractor: ImportExtractor) -> Result<Self> {
        check_options(&options)?;
        Ok(Self {
            normalizer: PathNormalizer::new(options.alias.clone()),
            analyzer: OrphanAnalyzer::from_options(&options),
            extractor,
            options,
        })
    }

    /// Scan the tree behind `fs` and analyze it.
    ///
    /// # Errors
    ///
    /// Fails only when the project root itself is unusable. Per-file failures
    /// are recorded in the report.
    pub fn scan<F: FileSystem>(&self, fs: &F) -> Result<AnalysisReport> {
        let start = Instant::now();

        // Step 1: Validate the root
        self.validate_root(fs)?;
        info!(root = %fs.project_root().display(), "scanning project");

        // Step 2: Inventory and reference graph in one pass
        let mut graph = ReferenceGraph::new();
        let inventory = FileInventory::collect(fs, &self.options, |record, text| {
            let specifiers = self.extractor.extract(text);
            for specifier in &specifiers {
                match self.normalizer.normalize(specifier, &record.path) {
                    Some(identity) => {
                        graph.insert(identity);
                    }
                    None => debug!(file = %record.path, specifier = %specifier, "unresolvable specifier"),
                }
            }
        });
        debug!(
            files = inventory.len(),
            identities = graph.len(),
            "traversal complete"
        );

        // Step 3: Analyze the finalized inventory
        let (records, errors) = inventory.into_parts();
        let analysis = self
            .analyzer
            .analyze(&records, &graph, |path| fs.exists(Path::new(path)));

        let mut statistics = analysis.statistics;
        statistics.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            files = statistics.total_files,
            empty = statistics.empty_files,
            suspicious = statistics.suspicious_directories,
            errors = errors.len(),
            duration_ms = statistics.duration_ms,
            "scan complete"
        );

        Ok(AnalysisReport {
            project_root: fs.project_root().to_path_buf(),
            findings: analysis.findings,
            directories: analysis.directories,
            statistics,
            errors,
        })
    }

    fn validate_root<F: FileSystem>(&self, fs: &F) -> Result<()> {
        if fs.project_root().as_os_str().is_empty() {
            return Err(Error::NoProjectRoot);
        }

        let path = fs.project_root().to_path_buf();
        let meta = fs
            .metadata(Path::new(""))
            .map_err(|_| Error::ProjectRootNotFound { path: path.clone() })?;

        if !meta.exists {
            return Err(Error::ProjectRootNotFound { path });
        }
        if !meta.is_dir {
            return Err(Error::NotADirectory { path });
        }
        Ok(())
    }
}

/// Checks that hold for options built without the config layer.
fn check_options(options: &ScanOptions) -> Result<()> {
    if options.small_file_threshold == 0 {
        return Err(Error::InvalidConfig {
            message: "small_file_threshold must be at least 1".to_string(),
        });
    }
    if let Some(ext) = options.code_extensions.iter().find(|ext| !ext.starts_with('.')) {
        return Err(Error::InvalidConfig {
            message: format!("code extension '{}' must start with '.'", ext),
        });
    }
    Ok(())
}

/// Scan `fs` with `options` using the built-in import syntaxes.
pub fn scan<F: FileSystem>(fs: &F, options: &ScanOptions) -> Result<AnalysisReport> {
    Scanner::new(options.clone())?.scan(fs)
}
