// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the CLI.
//
// - Normal runs print progress messages only ("Downloading ...", "Saved ...")
// - --verbose adds debug events, with level and module prefixes
// - RUST_LOG overrides both (e.g. RUST_LOG=reqwest=debug)
//
// Everything goes to stderr so stdout stays free for piping.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; call once, before anything logs
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    // Dependencies (reqwest, hyper, html5ever) stay at warn
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,deepwiki_export={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbose)
        .with_level(verbose)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
