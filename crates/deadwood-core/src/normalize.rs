//! Import specifier normalization.
//!
//! Maps a raw specifier plus the file that contains it to a project-relative
//! [`ResolvedIdentity`]. Resolution is purely lexical: nothing here touches the
//! filesystem, and a specifier that cannot be mapped is dropped rather than
//! reported as an error (third-party package names land here all the time).
//!
//! Rules, in priority order:
//!
//! 1. `./` and `../` specifiers are joined to the containing file's directory and
//!    collapsed. Anything that climbs above the project root is unresolvable.
//! 2. Specifiers starting with the alias prefix (`@/` by default) have the prefix
//!    replaced by the alias base (`src/`); the remainder is kept verbatim.
//! 3. A single bare segment that does not start with `.` is kept verbatim.
//! 4. Everything else (scoped packages, URLs, multi-segment bare paths) is dropped.

use crate::types::{AliasRule, ResolvedIdentity};

/// Identity used when a relative specifier collapses onto the project root itself.
const ROOT_IDENTITY: &str = ".";

/// Resolves import specifiers to project-relative identities.
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer {
    alias: AliasRule,
}

impl PathNormalizer {
    pub fn new(alias: AliasRule) -> Self {
        Self { alias }
    }

    /// Normalizes `specifier` as written in `containing_file` (project-relative,
    /// `/`-separated).
    ///
    /// Returns `None` when the specifier does not map to a project path.
    pub fn normalize(&self, specifier: &str, containing_file: &str) -> Option<ResolvedIdentity> {
        let specifier = specifier.trim();
        if specifier.is_empty() || specifier.contains('\0') {
            return None;
        }

        if specifier.starts_with("./") || specifier.starts_with("../") {
            return resolve_relative(specifier, containing_file).map(ResolvedIdentity::new);
        }

        if !self.alias.prefix.is_empty() {
            if let Some(rest) = specifier.strip_prefix(self.alias.prefix.as_str()) {
                return Some(ResolvedIdentity::new(format!("{}{}", self.alias.base, rest)));
            }
        }

        if !specifier.starts_with('.') && !specifier.contains(['/', '\\']) {
            return Some(ResolvedIdentity::new(specifier));
        }

        None
    }
}

/// Joins a relative specifier onto the directory of `containing_file` and collapses
/// `.` and `..` segments. Returns `None` if the result would escape the root.
fn resolve_relative(specifier: &str, containing_file: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    let mut dir_parts: Vec<&str> = containing_file.split(['/', '\\']).collect();
    dir_parts.pop();

    for part in dir_parts.into_iter().chain(specifier.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Some(ROOT_IDENTITY.to_string());
    }
    Some(segments.join("/"))
}
