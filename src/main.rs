use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use sceneboard::app;
use sceneboard::config::Config;

/// Regenerate the storyboard from the components in a source tree.
///
/// Scans for exported components, carries over scene positions from the
/// existing storyboard, prunes scenes for removed components, and writes the
/// storyboard back out.
#[derive(Parser, Debug)]
#[command(name = "sceneboard", version, about)]
struct Cli {
    /// Directory scanned for component files.
    #[arg(long, default_value = "src")]
    src_dir: PathBuf,

    /// Storyboard file to read back and regenerate.
    #[arg(long, default_value = "utopia/storyboard.js")]
    storyboard: PathBuf,

    /// Scan files whose name or path contains "utils".
    #[arg(long)]
    include_utils: bool,

    /// Scan files whose name or path contains "index".
    #[arg(long)]
    include_index: bool,

    /// Enable debug logging.
    #[arg(long)]
    verbose: bool,

    /// Ignore existing scene positions and lay everything out fresh.
    #[arg(long)]
    no_preserve: bool,

    /// Keep scenes whose component no longer exists.
    #[arg(long)]
    no_prune: bool,

    /// Skip the report of components that have no scene yet.
    #[arg(long)]
    no_force_regen: bool,

    /// Unrecognized arguments are accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if !cli.ignored.is_empty() {
        debug!(args = ?cli.ignored, "ignoring unrecognized arguments");
    }

    let config = Config::new(cli.src_dir, cli.storyboard)
        .include_utils(cli.include_utils)
        .include_index(cli.include_index)
        .preserve_existing(!cli.no_preserve)
        .prune_removed(!cli.no_prune)
        .report_missing(!cli.no_force_regen);

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "storyboard update failed");
            ExitCode::FAILURE
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
