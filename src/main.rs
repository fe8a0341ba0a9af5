// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (usage errors exit with 2)
// 2. Set up logging
// 3. Run the export pipeline once
// 4. Exit with a code that tells scripts what went wrong:
//      0 = success
//      2 = invalid URL
//      3 = download failed
//      4 = no content found
//      5 = could not write output
//
// The pipeline makes exactly one HTTP request, so a single-threaded tokio
// runtime is all we need.
// =============================================================================

mod cli;
mod error;
mod export;
mod extract;
mod fetch;
mod github;
mod logging;
mod markdown;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use cli::Cli;
use error::ExportError;
use export::Exporter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let request = cli.into_request();

    let report = Exporter::default()
        .export(&request)
        .await
        .with_context(|| format!("failed to export '{}'", request.url))?;

    info!(
        "Success: processed '{}' ({} block(s) from {}) and saved Markdown to '{}'",
        request.url,
        report.blocks,
        report.download_url,
        report.markdown_path.display()
    );
    if let Some(html_path) = &report.html_path {
        info!("Original HTML saved to '{}'", html_path.display());
    }
    if !report.chapter_paths.is_empty() {
        info!("Saved {} section file(s)", report.chapter_paths.len());
    }

    Ok(())
}

// Pipeline errors carry their own exit code; anything else is a plain failure
fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ExportError>()
        .map_or(1, ExportError::exit_code)
}
