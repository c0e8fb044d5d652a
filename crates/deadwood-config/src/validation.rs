use crate::types::DeadwoodConfig;
use deadwood_core::Error;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error as ThisError;

/// A configuration value that failed validation
#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted field name, e.g. `scan.code_extensions`
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate and canonicalize a project root
///
/// This function ensures:
/// 1. A path was given at all
/// 2. The path exists
/// 3. It's a directory
/// 4. Symlinks are resolved (canonicalized)
pub fn validate_project_path(path: &Path) -> Result<PathBuf, Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::NoProjectRoot);
    }

    let canonical = path
        .canonicalize()
        .map_err(|_| Error::ProjectRootNotFound {
            path: path.to_path_buf(),
        })?;

    if !canonical.is_dir() {
        return Err(Error::NotADirectory { path: canonical });
    }

    // Listing the root is the first thing a scan does
    fs::read_dir(&canonical)?;

    Ok(canonical)
}

/// Check every field of a configuration.
///
/// Reports the first invalid field.
pub fn validate_config(config: &DeadwoodConfig) -> Result<(), ValidationError> {
    for ext in &config.scan.code_extensions {
        validate_extension(ext)?;
    }

    for dir in &config.scan.ignored_dirs {
        validate_dir_name(dir)?;
    }

    if config.resolve.alias_prefix.is_empty() {
        return Err(ValidationError::new(
            "resolve.alias_prefix",
            "alias prefix must not be empty",
        ));
    }

    if config.report.small_file_threshold < 1 {
        return Err(ValidationError::new(
            "report.small_file_threshold",
            "threshold must be at least 1",
        ));
    }

    for path in &config.report.known_used {
        validate_known_path(path)?;
    }

    Ok(())
}

/// Extensions are matched with their leading dot, e.g. `.tsx`.
fn validate_extension(ext: &str) -> Result<(), ValidationError> {
    if ext.len() < 2 || !ext.starts_with('.') {
        return Err(ValidationError::new(
            "scan.code_extensions",
            format!("'{}' must start with '.' followed by a name", ext),
        ));
    }
    if ext.contains(['/', '\\']) {
        return Err(ValidationError::new(
            "scan.code_extensions",
            format!("'{}' must not contain a path separator", ext),
        ));
    }
    Ok(())
}

/// Ignored directories are matched by bare name at any depth.
fn validate_dir_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ValidationError::new(
            "scan.ignored_dirs",
            format!("'{}' must be a bare directory name", name),
        ));
    }
    Ok(())
}

fn validate_known_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::new(
            "report.known_used",
            "paths must not be empty",
        ));
    }

    for component in Path::new(path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(ValidationError::new(
                    "report.known_used",
                    format!("'{}' must be relative to the project root", path),
                ));
            }
            Component::ParentDir => {
                return Err(ValidationError::new(
                    "report.known_used",
                    format!("'{}' must not contain '..'", path),
                ));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}
