//! Native filesystem implementation using std::fs + ignore.

use crate::file_system::{normalize_relative, DiscoveryOptions, FileMetadata, FileSystem, FileWalk, WalkError};
use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only view of a directory on disk.
#[derive(Debug, Clone)]
pub struct NativeFileSystem {
    project_root: PathBuf,
}

impl NativeFileSystem {
    /// Create a new native filesystem scoped to a project root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist or can't be canonicalized.
    pub fn new(project_root: impl AsRef<Path>) -> io::Result<Self> {
        let project_root = project_root.as_ref().canonicalize()?;
        Ok(Self { project_root })
    }

    /// Resolve a project-relative path to an absolute one inside the root.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let relative = normalize_relative(path)?;
        // `join("")` would append a trailing separator
        if relative.as_os_str().is_empty() {
            return Ok(self.project_root.clone());
        }
        Ok(self.project_root.join(relative))
    }
}

impl FileSystem for NativeFileSystem {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let resolved = self.resolve(path)?;
        // Follows symlinks, so a dangling link reads as missing.
        let meta = match std::fs::metadata(&resolved) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %resolved.display(), "path missing or dangling link");
                return Ok(FileMetadata::missing());
            }
            Err(e) => return Err(e),
        };

        Ok(FileMetadata {
            exists: true,
            is_file: meta.is_file(),
            is_dir: meta.is_dir(),
            size: if meta.is_file() { meta.len() } else { 0 },
        })
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path)?)
    }

    fn walk_files(&self, options: &DiscoveryOptions) -> FileWalk<'_> {
        let ignored = options.ignored_dirs.clone();

        let mut builder = WalkBuilder::new(&self.project_root);
        builder
            .standard_filters(false)
            .git_ignore(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                if entry.depth() == 0 || !is_dir {
                    return true;
                }
                let keep = !ignored.contains(entry.file_name().to_string_lossy().as_ref());
                if !keep {
                    debug!(dir = %entry.path().display(), "pruning ignored directory");
                }
                keep
            });

        let root = self.project_root.clone();
        Box::new(builder.build().filter_map(move |result| match result {
            Ok(entry) => {
                let is_file = match entry.file_type() {
                    Some(ft) if ft.is_file() => true,
                    Some(ft) if ft.is_symlink() => entry.path().is_file(),
                    _ => false,
                };
                if !is_file {
                    return None;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                Some(Ok(relative))
            }
            Err(err) => Some(Err(WalkError {
                path: error_path(&err).map(|p| p.strip_prefix(&root).unwrap_or(p).to_path_buf()),
                message: err.to_string(),
            })),
        }))
    }
}

/// Digs the offending path out of a walker error, if it carries one.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
