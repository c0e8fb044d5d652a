//! In-memory filesystem implementation.

use crate::file_system::{
    normalize_relative, DiscoveryOptions, FileMetadata, FileSystem, FileWalk, WalkError,
};
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
enum Entry {
    Contents(Vec<u8>),
    /// A file that is listed but fails to read with this error kind.
    Broken(io::ErrorKind),
    /// A directory whose listing fails during the walk.
    Unlistable(String),
}

/// In-memory project tree.
///
/// Files are keyed by project-relative path; directories are implicit. Iteration
/// order is component-wise lexical, which matches a sorted depth-first walk.
///
/// # Example
///
/// ```
/// use deadwood_fs::{FileSystem, MemoryFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new("/project")
///     .with_file("src/App.tsx", "import './index.css';")
///     .with_file("src/index.css", "");
///
/// assert!(fs.exists(Path::new("src")));
/// assert_eq!(fs.read_to_string(Path::new("src/index.css")).unwrap(), "");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    project_root: PathBuf,
    files: BTreeMap<PathBuf, Entry>,
}

impl MemoryFileSystem {
    /// Create an empty tree under a virtual root.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            files: BTreeMap::new(),
        }
    }

    /// Add a file. Paths that escape the root are ignored.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        if let Ok(normalized) = normalize_relative(path.as_ref()) {
            self.files.insert(normalized, Entry::Contents(contents.into()));
        }
        self
    }

    /// Add a file that is listed by the walk but fails to read or stat.
    pub fn with_broken_file(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        if let Ok(normalized) = normalize_relative(path.as_ref()) {
            self.files.insert(normalized, Entry::Broken(kind));
        }
        self
    }

    /// Add a directory that exists but cannot be listed; the walk reports
    /// `message` for it and carries on with its siblings.
    pub fn with_walk_error(mut self, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        if let Ok(normalized) = normalize_relative(path.as_ref()) {
            self.files.insert(normalized, Entry::Unlistable(message.into()));
        }
        self
    }

    fn is_dir(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return true;
        }
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let normalized = normalize_relative(path)?;
        match self.files.get(&normalized) {
            Some(Entry::Contents(contents)) => Ok(FileMetadata {
                exists: true,
                is_file: true,
                is_dir: false,
                size: contents.len() as u64,
            }),
            Some(Entry::Unlistable(_)) => Ok(FileMetadata {
                exists: true,
                is_file: false,
                is_dir: true,
                size: 0,
            }),
            Some(Entry::Broken(kind)) => Err(io::Error::new(
                *kind,
                format!("Cannot stat {}", normalized.display()),
            )),
            None if self.is_dir(&normalized) => Ok(FileMetadata {
                exists: true,
                is_file: false,
                is_dir: true,
                size: 0,
            }),
            None => Ok(FileMetadata::missing()),
        }
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let normalized = normalize_relative(path)?;
        match self.files.get(&normalized) {
            Some(Entry::Contents(contents)) => Ok(contents.clone()),
            Some(Entry::Broken(kind)) => Err(io::Error::new(
                *kind,
                format!("Cannot read {}", normalized.display()),
            )),
            Some(Entry::Unlistable(_)) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Is a directory: {}", normalized.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", normalized.display()),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        match normalize_relative(path) {
            Ok(normalized) => self.files.contains_key(&normalized) || self.is_dir(&normalized),
            Err(_) => false,
        }
    }

    fn walk_files(&self, options: &DiscoveryOptions) -> FileWalk<'_> {
        let options = options.clone();
        Box::new(
            self.files
                .iter()
                .filter(move |(path, entry)| {
                    // Every component except a file's own name is a directory.
                    let depth = path.components().count();
                    let dirs = match entry {
                        Entry::Unlistable(_) => depth,
                        _ => depth.saturating_sub(1),
                    };
                    !path.components().take(dirs).any(|c| match c {
                        Component::Normal(name) => options.is_ignored_dir(&name.to_string_lossy()),
                        _ => false,
                    })
                })
                .map(|(path, entry)| match entry {
                    Entry::Unlistable(message) => Err(WalkError {
                        path: Some(path.clone()),
                        message: message.clone(),
                    }),
                    _ => Ok(path.clone()),
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_are_implicit() {
        let fs = MemoryFileSystem::new("/p").with_file("src/lib/supabase.ts", "x");

        assert!(fs.exists(Path::new("src")));
        assert!(fs.exists(Path::new("src/lib")));
        assert!(fs.exists(Path::new("src/lib/supabase.ts")));
        assert!(!fs.exists(Path::new("src/li")));
        assert!(fs.metadata(Path::new("src/lib")).unwrap().is_dir);
    }

    #[test]
    fn test_broken_files_fail_to_read() {
        let fs = MemoryFileSystem::new("/p").with_broken_file("a.ts", io::ErrorKind::PermissionDenied);

        let err = fs.read(Path::new("a.ts")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.metadata(Path::new("a.ts")).is_err());
    }

    #[test]
    fn test_walk_prunes_ignored_dirs() {
        let fs = MemoryFileSystem::new("/p")
            .with_file("src/a.ts", "")
            .with_file("node_modules/react/index.js", "")
            .with_file("src/node_modules/x.js", "")
            .with_file("build", "a file, not a directory");

        let options = DiscoveryOptions {
            ignored_dirs: ["node_modules".to_string(), "build".to_string()].into(),
            ..Default::default()
        };
        let walked: Vec<PathBuf> = fs.walk_files(&options).map(Result::unwrap).collect();

        assert_eq!(walked, vec![PathBuf::from("build"), PathBuf::from("src/a.ts")]);
    }

    #[test]
    fn test_unlistable_directory_is_reported_in_walk_order() {
        let fs = MemoryFileSystem::new("/p")
            .with_file("src/a.ts", "")
            .with_walk_error("src/locked", "permission denied")
            .with_file("src/z.ts", "");

        let walked: Vec<_> = fs.walk_files(&DiscoveryOptions::default()).collect();

        assert_eq!(walked.len(), 3);
        assert_eq!(walked[0].as_ref().unwrap(), &PathBuf::from("src/a.ts"));
        let err = walked[1].as_ref().unwrap_err();
        assert_eq!(err.path.as_deref(), Some(Path::new("src/locked")));
        assert_eq!(err.message, "permission denied");
        assert_eq!(walked[2].as_ref().unwrap(), &PathBuf::from("src/z.ts"));

        assert!(fs.metadata(Path::new("src/locked")).unwrap().is_dir);
    }

    #[test]
    fn test_unlistable_ignored_directory_is_pruned() {
        let fs = MemoryFileSystem::new("/p").with_walk_error("node_modules", "denied");
        let options = DiscoveryOptions {
            ignored_dirs: ["node_modules".to_string()].into(),
            ..Default::default()
        };

        assert_eq!(fs.walk_files(&options).count(), 0);
    }
}
