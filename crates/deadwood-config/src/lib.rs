//! Configuration for deadwood.
//!
//! Reads `.deadwood.toml`, layers command-line overrides on top, validates the
//! result and turns it into [`deadwood_core::ScanOptions`].

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_from, load_scan_options, load_with_filesystem, parse, ConfigError, CONFIG_FILE_NAME};
pub use types::{ConfigOverrides, DeadwoodConfig, ReportSettings, ResolveSettings, ScanSettings};
pub use validation::{validate_config, validate_project_path, ValidationError};
