//! Top-level run: scan, read back, reconcile, write.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::scan::{self, ScanError};
use crate::storyboard::parser::{parse_storyboard, ParsedScene};
use crate::storyboard::{reconcile, serialize};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot write storyboard {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run one full regeneration pass.
///
/// Failure to read or parse the existing storyboard is not fatal: the run
/// falls back to generating a fresh layout. Only an unreadable source tree
/// or an unwritable output path aborts.
pub fn run(config: &Config) -> Result<(), Error> {
    let components = scan::scan_components(config)?;
    info!(count = components.len(), "component scan complete");
    for component in &components {
        info!(
            component = %component.name,
            file = %component.path,
            has_style_prop = component.has_style_prop,
            "found component"
        );
    }

    let previous = load_previous(config);

    if config.report_missing {
        if let Some(scenes) = &previous {
            for component in &components {
                let id = component.scene_id();
                if !scenes.iter().any(|s| s.id == id) {
                    info!(
                        component = %component.name,
                        scene = %id,
                        "component has no scene yet, one will be added"
                    );
                }
            }
        }
    }

    let scenes = reconcile::reconcile(&components, previous.as_deref(), config);
    let document = serialize::render_storyboard(&components, &scenes);

    fs::write(&config.storyboard_path, document).map_err(|source| Error::Write {
        path: config.storyboard_path.clone(),
        source,
    })?;
    info!(
        path = %config.storyboard_path.display(),
        scenes = scenes.len(),
        "storyboard updated"
    );

    Ok(())
}

/// Read and parse the existing storyboard, if carry-over is enabled.
///
/// Returns `None` whenever a previous layout cannot be used, which makes the
/// reconciler lay everything out from scratch.
fn load_previous(config: &Config) -> Option<Vec<ParsedScene>> {
    if !config.preserve_existing {
        info!("carry-over disabled, generating a fresh layout");
        return None;
    }
    if !config.storyboard_path.exists() {
        info!(
            path = %config.storyboard_path.display(),
            "no existing storyboard, generating a fresh one"
        );
        return None;
    }

    let text = match fs::read_to_string(&config.storyboard_path) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                path = %config.storyboard_path.display(),
                error = %err,
                "cannot read existing storyboard, generating a fresh one"
            );
            return None;
        }
    };

    match parse_storyboard(&text) {
        Ok(scenes) => {
            for scene in &scenes {
                info!(
                    scene = %scene.id,
                    left = scene.rect.left,
                    component = scene.component_name.as_deref().unwrap_or("<unknown>"),
                    "found existing scene"
                );
            }
            Some(scenes)
        }
        Err(err) => {
            warn!(
                path = %config.storyboard_path.display(),
                error = %err,
                "error parsing existing storyboard, generating a fresh one"
            );
            None
        }
    }
}
