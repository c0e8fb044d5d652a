use crate::types::{ConfigOverrides, DeadwoodConfig};
use crate::validation::{validate_config, ValidationError};
use deadwood_core::ScanOptions;
use deadwood_fs::{FileSystem, NativeFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name looked up in the project root when no config path is given.
pub const CONFIG_FILE_NAME: &str = ".deadwood.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlDe {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),
}

/// Parse configuration text. `path` is only used in error messages.
pub fn parse(contents: &str, path: &Path) -> Result<DeadwoodConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::TomlDe {
        path: path.to_path_buf(),
        source,
    })
}

/// Load config from a specific path.
pub fn load_from(path: &Path) -> Result<DeadwoodConfig, ConfigError> {
    let not_found = || ConfigError::ConfigNotFound(path.to_path_buf());

    // Scope a filesystem to the config directory
    let config_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().map(Path::new).ok_or_else(not_found)?;
    let fs = NativeFileSystem::new(config_dir).map_err(|_| not_found())?;

    load_with_filesystem(&fs, file_name)?.ok_or_else(not_found)
}

/// Load `path` through `fs`, or `None` when there is no such file.
pub fn load_with_filesystem<F: FileSystem>(
    fs: &F,
    path: &Path,
) -> Result<Option<DeadwoodConfig>, ConfigError> {
    let meta = fs.metadata(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file {
        return Ok(None);
    }

    let display_path = fs.project_root().join(path);
    let contents = fs
        .read_to_string(path)
        .map_err(|source| ConfigError::Io {
            path: display_path.clone(),
            source,
        })?;

    debug!(path = %display_path.display(), "loaded configuration");
    parse(&contents, &display_path).map(Some)
}

/// Resolve the effective scan options for the tree behind `fs`.
///
/// Uses `explicit` when given, otherwise `.deadwood.toml` in the project root if
/// present, otherwise the built-in defaults. Overrides are applied before
/// validation, so command-line values are checked too.
pub fn load_scan_options<F: FileSystem>(
    fs: &F,
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ScanOptions, ConfigError> {
    let mut config = match explicit {
        Some(path) => load_from(path)?,
        None => load_with_filesystem(fs, Path::new(CONFIG_FILE_NAME))?.unwrap_or_else(|| {
            debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            DeadwoodConfig::default()
        }),
    };

    config.apply(overrides);
    validate_config(&config)?;

    Ok(config.to_scan_options())
}
