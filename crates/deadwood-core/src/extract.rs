//! Import statement extraction.
//!
//! Each import syntax family is an [`ImportSyntax`] strategy that reports the raw
//! specifiers it finds as [`SpecifierOccurrence`]s. The extractor runs every
//! registered strategy over a file's text and merges the results. Matching is
//! heuristic: constructs may span lines, and text that does not fit a pattern
//! simply produces no occurrence.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Import syntax families recognized out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    /// `import x from "spec"`, `import { a,\n b } from "spec"`, `export * from "spec"`
    EsModule,
    /// `import "spec"`
    SideEffect,
    /// `require("spec")`
    CommonJs,
    /// `@import "spec"` and `@import url("spec")`
    Stylesheet,
}

impl SyntaxKind {
    pub fn all() -> &'static [SyntaxKind] {
        &[
            SyntaxKind::EsModule,
            SyntaxKind::SideEffect,
            SyntaxKind::CommonJs,
            SyntaxKind::Stylesheet,
        ]
    }

    /// Regex with a single capture group holding the specifier.
    fn pattern(&self) -> &'static str {
        match self {
            // The clause between `import` and `from` may span lines but never crosses
            // a string literal or statement end.
            SyntaxKind::EsModule => r#"\b(?:import|export)\s+[^'";]*?\bfrom\s*['"]([^'"\r\n]+)['"]"#,
            SyntaxKind::SideEffect => r#"\bimport\s*['"]([^'"\r\n]+)['"]"#,
            SyntaxKind::CommonJs => r#"\brequire\s*\(\s*['"]([^'"\r\n]+)['"]\s*\)"#,
            SyntaxKind::Stylesheet => r#"@import\s+(?:url\(\s*)?['"]([^'"\r\n]+)['"]"#,
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyntaxKind::EsModule => "es-module",
            SyntaxKind::SideEffect => "side-effect",
            SyntaxKind::CommonJs => "commonjs",
            SyntaxKind::Stylesheet => "stylesheet",
        };
        f.write_str(name)
    }
}

/// A raw specifier found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierOccurrence {
    /// Specifier text with surrounding whitespace removed.
    pub specifier: String,

    /// Syntax family that matched.
    pub syntax: SyntaxKind,

    /// Byte offset of the match start.
    pub offset: usize,
}

/// Strategy for one family of import-like constructs.
pub trait ImportSyntax: Send + Sync + fmt::Debug {
    fn kind(&self) -> SyntaxKind;

    /// Every occurrence of this syntax in `text`.
    fn occurrences(&self, text: &str) -> Vec<SpecifierOccurrence>;
}

/// Regex-backed strategy for one of the built-in syntax families.
#[derive(Debug)]
pub struct PatternSyntax {
    kind: SyntaxKind,
    regex: Regex,
}

impl PatternSyntax {
    pub fn new(kind: SyntaxKind) -> Result<Self> {
        Ok(Self {
            kind,
            regex: Regex::new(kind.pattern())?,
        })
    }
}

impl ImportSyntax for PatternSyntax {
    fn kind(&self) -> SyntaxKind {
        self.kind
    }

    fn occurrences(&self, text: &str) -> Vec<SpecifierOccurrence> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let specifier = caps.get(1)?.as_str().trim();
                if specifier.is_empty() {
                    return None;
                }
                Some(SpecifierOccurrence {
                    specifier: specifier.to_string(),
                    syntax: self.kind,
                    offset: whole.start(),
                })
            })
            .collect()
    }
}

/// Runs every registered [`ImportSyntax`] over a file's text.
#[derive(Debug)]
pub struct ImportExtractor {
    syntaxes: Vec<Box<dyn ImportSyntax>>,
}

impl ImportExtractor {
    /// Creates an extractor with all built-in syntax families.
    pub fn new() -> Result<Self> {
        let syntaxes = SyntaxKind::all()
            .iter()
            .map(|kind| PatternSyntax::new(*kind).map(|s| Box::new(s) as Box<dyn ImportSyntax>))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { syntaxes })
    }

    /// Creates an extractor with no syntax families registered.
    pub fn empty() -> Self {
        Self {
            syntaxes: Vec::new(),
        }
    }

    /// Registers an additional syntax family.
    pub fn with_syntax(mut self, syntax: Box<dyn ImportSyntax>) -> Self {
        self.syntaxes.push(syntax);
        self
    }

    /// Every occurrence from every strategy, ordered by position in the text.
    pub fn occurrences(&self, text: &str) -> Vec<SpecifierOccurrence> {
        let mut all: Vec<SpecifierOccurrence> = self
            .syntaxes
            .iter()
            .flat_map(|syntax| syntax.occurrences(text))
            .collect();
        all.sort_by(|a, b| a.offset.cmp(&b.offset).then(a.syntax.cmp(&b.syntax)));
        all
    }

    /// Distinct specifiers found in `text`, sorted.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        self.syntaxes
            .iter()
            .flat_map(|syntax| syntax.occurrences(text))
            .map(|occurrence| occurrence.specifier)
            .collect()
    }
}
