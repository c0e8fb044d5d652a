use deadwood_core::{
    AliasRule, KnownUsedSet, ScanOptions, DEFAULT_ALIAS_BASE, DEFAULT_ALIAS_PREFIX,
    DEFAULT_CODE_EXTENSIONS, DEFAULT_IGNORED_DIRS, DEFAULT_KNOWN_USED,
    DEFAULT_SMALL_FILE_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Contents of a `.deadwood.toml` file.
///
/// Every section and every field is optional; missing values fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeadwoodConfig {
    /// Traversal settings
    #[serde(default)]
    pub scan: ScanSettings,

    /// Specifier resolution settings
    #[serde(default)]
    pub resolve: ResolveSettings,

    /// Report settings
    #[serde(default)]
    pub report: ReportSettings,
}

/// `[scan]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanSettings {
    /// Directory names pruned during traversal
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// Extensions (with the leading dot) whose contents are scanned
    #[serde(default = "default_code_extensions")]
    pub code_extensions: Vec<String>,

    /// Honor `.gitignore` files as well
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            ignored_dirs: default_ignored_dirs(),
            code_extensions: default_code_extensions(),
            respect_gitignore: false,
        }
    }
}

/// `[resolve]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolveSettings {
    #[serde(default = "default_alias_prefix")]
    pub alias_prefix: String,

    #[serde(default = "default_alias_base")]
    pub alias_base: String,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            alias_prefix: default_alias_prefix(),
            alias_base: default_alias_base(),
        }
    }
}

/// `[report]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSettings {
    /// Trimmed character count below which a code file counts as small
    #[serde(default = "default_small_file_threshold")]
    pub small_file_threshold: usize,

    /// Paths checked for presence on every run
    #[serde(default = "default_known_used")]
    pub known_used: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            small_file_threshold: default_small_file_threshold(),
            known_used: default_known_used(),
        }
    }
}

/// Command-line values layered on top of the file configuration.
///
/// `None` and empty values leave the file setting untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Added to the configured ignored directories
    pub extra_ignored_dirs: Vec<String>,

    /// Replaces the alias pair
    pub alias: Option<AliasRule>,

    pub small_file_threshold: Option<usize>,

    /// Replaces the known-used list when non-empty
    pub known_used: Vec<String>,

    /// Turns gitignore handling on; it is never turned off from the command line
    pub respect_gitignore: bool,
}

impl DeadwoodConfig {
    /// Layer command-line overrides on top of this configuration.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        for dir in &overrides.extra_ignored_dirs {
            if !self.scan.ignored_dirs.contains(dir) {
                self.scan.ignored_dirs.push(dir.clone());
            }
        }
        if let Some(alias) = &overrides.alias {
            self.resolve.alias_prefix = alias.prefix.clone();
            self.resolve.alias_base = alias.base.clone();
        }
        if let Some(threshold) = overrides.small_file_threshold {
            self.report.small_file_threshold = threshold;
        }
        if !overrides.known_used.is_empty() {
            self.report.known_used = overrides.known_used.clone();
        }
        if overrides.respect_gitignore {
            self.scan.respect_gitignore = true;
        }
    }

    /// Build scan options.
    ///
    /// Call [`validate_config`](crate::validate_config) first; this conversion
    /// does not check anything.
    pub fn to_scan_options(&self) -> ScanOptions {
        ScanOptions {
            ignored_dirs: self.scan.ignored_dirs.iter().cloned().collect(),
            code_extensions: self.scan.code_extensions.iter().cloned().collect(),
            alias: AliasRule {
                prefix: self.resolve.alias_prefix.clone(),
                base: self.resolve.alias_base.clone(),
            },
            small_file_threshold: self.report.small_file_threshold,
            known_used: KnownUsedSet::new(self.report.known_used.iter().cloned()),
            respect_gitignore: self.scan.respect_gitignore,
        }
    }
}

// Default value functions
fn default_ignored_dirs() -> Vec<String> {
    DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_code_extensions() -> Vec<String> {
    DEFAULT_CODE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_alias_prefix() -> String {
    DEFAULT_ALIAS_PREFIX.to_string()
}

fn default_alias_base() -> String {
    DEFAULT_ALIAS_BASE.to_string()
}

fn default_small_file_threshold() -> usize {
    DEFAULT_SMALL_FILE_THRESHOLD
}

fn default_known_used() -> Vec<String> {
    DEFAULT_KNOWN_USED.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: DeadwoodConfig = toml::from_str("").unwrap();
        assert_eq!(config, DeadwoodConfig::default());
        assert_eq!(config.report.small_file_threshold, 50);
        assert_eq!(config.resolve.alias_prefix, "@/");
        assert!(config.scan.ignored_dirs.contains(&"node_modules".to_string()));
        assert_eq!(config.report.known_used.len(), 7);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: DeadwoodConfig = toml::from_str(
            r#"
            [report]
            small_file_threshold = 10

            [resolve]
            alias_prefix = "~/"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.small_file_threshold, 10);
        assert_eq!(config.report.known_used, default_known_used());
        assert_eq!(config.resolve.alias_prefix, "~/");
        assert_eq!(config.resolve.alias_base, "src/");
        assert_eq!(config.scan, ScanSettings::default());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = DeadwoodConfig::default();
        config.scan.respect_gitignore = true;
        config.report.known_used = vec!["src/main.tsx".to_string()];

        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: DeadwoodConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_overrides_layer_on_top() {
        let mut config = DeadwoodConfig::default();
        config.apply(&ConfigOverrides {
            extra_ignored_dirs: vec!["coverage".to_string(), "dist".to_string()],
            alias: Some(AliasRule {
                prefix: "~/".to_string(),
                base: "app/".to_string(),
            }),
            small_file_threshold: Some(5),
            known_used: vec!["app/main.ts".to_string()],
            respect_gitignore: true,
        });

        assert!(config.scan.ignored_dirs.contains(&"coverage".to_string()));
        assert_eq!(
            config.scan.ignored_dirs.iter().filter(|d| *d == "dist").count(),
            1
        );
        assert_eq!(config.resolve.alias_base, "app/");
        assert_eq!(config.report.small_file_threshold, 5);
        assert_eq!(config.report.known_used, vec!["app/main.ts".to_string()]);
        assert!(config.scan.respect_gitignore);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = DeadwoodConfig::default();
        config.apply(&ConfigOverrides::default());
        assert_eq!(config, DeadwoodConfig::default());
    }

    #[test]
    fn test_to_scan_options() {
        let config = DeadwoodConfig::default();
        let options = config.to_scan_options();
        let defaults = ScanOptions::default();

        assert_eq!(options.ignored_dirs, defaults.ignored_dirs);
        assert_eq!(options.code_extensions, defaults.code_extensions);
        assert_eq!(options.alias, defaults.alias);
        assert_eq!(options.known_used, defaults.known_used);
        assert!(options.is_code_extension(".scss"));
    }
}
