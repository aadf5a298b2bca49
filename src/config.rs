//! Run configuration.
//!
//! All flag handling happens once, up front: CLI flags are folded into an
//! immutable [`Config`] that the scanner and reconciler receive by reference.
//! Nothing mutates shared ignore lists at runtime.

use std::path::PathBuf;

/// File extensions the scanner considers (without the leading dot).
pub const SOURCE_EXTENSIONS: &[&str] = &["jsx", "js", "tsx", "ts"];

/// Tokens that exclude a file when its base name or relative path contains
/// one of them (case-insensitively).
pub const DEFAULT_IGNORE_TOKENS: &[&str] = &[
    "index", "utils", "router", "spec", "mock", "helpers", "constants", "types",
];

/// One fully resolved run of the tool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory scanned for components.
    pub src_dir: PathBuf,
    /// Storyboard file that is read back and regenerated.
    pub storyboard_path: PathBuf,
    /// Lowercase substrings that exclude a file from scanning.
    pub ignore_tokens: Vec<String>,
    /// Lowercase substrings that re-include an excluded file (these win).
    pub force_include: Vec<String>,
    /// Carry geometry over from the existing storyboard.
    pub preserve_existing: bool,
    /// Drop scenes whose component no longer exists.
    pub prune_removed: bool,
    /// Report components that exist but have no scene yet.
    pub report_missing: bool,
}

impl Config {
    /// Default configuration for the given scan root and storyboard path.
    pub fn new(src_dir: impl Into<PathBuf>, storyboard_path: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            storyboard_path: storyboard_path.into(),
            ignore_tokens: DEFAULT_IGNORE_TOKENS.iter().map(|t| t.to_string()).collect(),
            force_include: Vec::new(),
            preserve_existing: true,
            prune_removed: true,
            report_missing: true,
        }
    }

    /// Stop ignoring `utils` files.
    pub fn include_utils(mut self, include: bool) -> Self {
        if include {
            self.ignore_tokens.retain(|t| t != "utils");
        }
        self
    }

    /// Stop ignoring `index` files.
    pub fn include_index(mut self, include: bool) -> Self {
        if include {
            self.ignore_tokens.retain(|t| t != "index");
        }
        self
    }

    /// Toggle carry-over of existing scene geometry.
    pub fn preserve_existing(mut self, preserve: bool) -> Self {
        self.preserve_existing = preserve;
        self
    }

    /// Toggle pruning of scenes for removed components.
    pub fn prune_removed(mut self, prune: bool) -> Self {
        self.prune_removed = prune;
        self
    }

    /// Toggle the missing-scene diagnostics.
    pub fn report_missing(mut self, report: bool) -> Self {
        self.report_missing = report;
        self
    }

    /// Whether a file should be excluded from scanning.
    ///
    /// `base_name` is the file name without extension, `rel_path` the path
    /// relative to the scan root. Force-include tokens (matched against the
    /// base name) override the ignore tokens.
    pub fn excludes(&self, base_name: &str, rel_path: &str) -> bool {
        let base = base_name.to_lowercase();
        let rel = rel_path.to_lowercase();

        let ignored = self
            .ignore_tokens
            .iter()
            .any(|t| base.contains(t.as_str()) || rel.contains(t.as_str()));
        if !ignored {
            return false;
        }

        !self.force_include.iter().any(|t| base.contains(t.as_str()))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
