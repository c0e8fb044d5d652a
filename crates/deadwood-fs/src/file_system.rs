//! FileSystem trait for read-only project traversal.

use std::collections::BTreeSet;
use std::io;
use std::path::{Component, Path, PathBuf};

/// File metadata compatible across implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Whether the path exists. A dangling symlink does not.
    pub exists: bool,
    /// Whether the path is a file (false if directory or doesn't exist).
    pub is_file: bool,
    /// Whether the path is a directory.
    pub is_dir: bool,
    /// File size in bytes (0 for directories or non-existent files).
    pub size: u64,
}

impl FileMetadata {
    pub(crate) fn missing() -> Self {
        Self {
            exists: false,
            is_file: false,
            is_dir: false,
            size: 0,
        }
    }
}

/// Options for walking the project tree.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Directory names that are never descended into.
    pub ignored_dirs: BTreeSet<String>,

    /// Honor `.gitignore` files (default: false).
    pub respect_gitignore: bool,
}

impl DiscoveryOptions {
    /// Whether a directory with this name is pruned.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }
}

/// A traversal failure below the project root.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct WalkError {
    /// Project-relative path where the failure happened, when known.
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Lazy sequence of project-relative file paths.
pub type FileWalk<'a> = Box<dyn Iterator<Item = Result<PathBuf, WalkError>> + 'a>;

/// Read-only filesystem abstraction scoped to a project root.
///
/// Every path argument is project-relative. Paths that would leave the root are
/// rejected with `io::ErrorKind::PermissionDenied`.
///
/// # Implementations
///
/// - [`NativeFileSystem`](crate::NativeFileSystem): the real disk
/// - [`MemoryFileSystem`](crate::MemoryFileSystem): an in-memory tree, used by tests
///   and by callers that already hold file contents
pub trait FileSystem {
    /// Get the project root this filesystem is scoped to.
    fn project_root(&self) -> &Path;

    /// Get file/directory metadata.
    ///
    /// Returns metadata even if the path doesn't exist (exists=false).
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Read file contents as bytes.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::InvalidData` if the file is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.exists).unwrap_or(false)
    }

    /// Walk every file under the root in file-name order.
    ///
    /// Ignored directories are pruned before descent, not filtered afterwards.
    fn walk_files(&self, options: &DiscoveryOptions) -> FileWalk<'_>;
}

/// Lexically normalizes a project-relative path.
///
/// Rejects absolute paths and any `..` that would climb above the root.
pub(crate) fn normalize_relative(path: &Path) -> io::Result<PathBuf> {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("Absolute path not allowed: {}", path.display()),
                ));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if components.pop().is_none() {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        format!("Path traversal detected: {} is outside project root", path.display()),
                    ));
                }
            }
            Component::Normal(name) => components.push(name),
        }
    }

    Ok(components.into_iter().collect())
}
