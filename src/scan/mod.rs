//! Component Scanner.
//!
//! Walks the configured source tree, skips ignored files, and produces one
//! [`ComponentRecord`] per qualifying exported declaration. Detection is
//! heuristic: an export qualifies when its identifier starts uppercase and
//! at least one file-level [signal](signals) fires.

pub mod lexer;
pub mod signals;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, SOURCE_EXTENSIONS};

/// One qualifying exported component discovered by the scanner.
///
/// Immutable once created; lives for one run of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    /// Exported identifier.
    pub name: String,
    /// Path relative to the scan root, forward slashes, extension included.
    pub path: String,
    /// Whether the declaration's parameters suggest a style-injection prop.
    pub has_style_prop: bool,
}

impl ComponentRecord {
    /// Derived scene identifier: `lowercase(name) + "-scene"`.
    pub fn scene_id(&self) -> String {
        scene_id(&self.name)
    }

    /// The relative path without its source extension, for import statements.
    pub fn import_path(&self) -> &str {
        match self.path.rfind('.') {
            Some(dot) if !self.path[dot..].contains('/') => &self.path[..dot],
            _ => &self.path,
        }
    }
}

/// Derive the scene identifier for a component name.
pub fn scene_id(component_name: &str) -> String {
    format!("{}-scene", component_name.to_lowercase())
}

/// Errors from scanning the source tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read source directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scan the configured source tree for components.
///
/// Directories are visited recursively with entries in sorted order, so the
/// result is deterministic for a given tree. Files that cannot be read are
/// logged and skipped.
pub fn scan_components(config: &Config) -> Result<Vec<ComponentRecord>, ScanError> {
    let mut records = Vec::new();
    scan_dir(config, &config.src_dir, &mut records)?;
    Ok(records)
}

fn scan_dir(config: &Config, dir: &Path, records: &mut Vec<ComponentRecord>) -> Result<(), ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            scan_dir(config, &path, records)?;
            continue;
        }

        let Some(ext) = path.extension().and_then(OsStr::to_str) else {
            continue;
        };
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        let base_name = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_string();
        let rel_path = relative_path(&config.src_dir, &path);

        if config.excludes(&base_name, &rel_path) {
            info!(file = %rel_path, "skipping ignored file");
            continue;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %rel_path, error = %err, "cannot read file, skipping");
                continue;
            }
        };

        records.extend(components_in_file(&text, &rel_path));
    }

    Ok(())
}

/// Extract qualifying component records from a single file's text.
///
/// Duplicate export declarations for the same name yield duplicate records;
/// deduplication only happens later, at the import level.
pub fn components_in_file(text: &str, rel_path: &str) -> Vec<ComponentRecord> {
    let Some(signal) = signals::first_match(text) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for decl in lexer::exported_decls(text) {
        if !decl.name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            continue;
        }

        let has_style_prop = decl
            .params
            .as_deref()
            .is_some_and(signals::params_accept_style);

        debug!(
            component = %decl.name,
            file = %rel_path,
            signal,
            has_style_prop,
            "detected component"
        );

        records.push(ComponentRecord {
            name: decl.name,
            path: rel_path.to_string(),
            has_style_prop,
        });
    }

    records
}

/// Path of `file` relative to `root`, with forward slashes.
fn relative_path(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    parts.join("/")
}

// ===========================================================================
// Tests
// ===========================================================================
