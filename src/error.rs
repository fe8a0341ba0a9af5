// src/error.rs
// =============================================================================
// Error types for the export pipeline.
//
// Every stage of the pipeline fails with one variant of ExportError:
// - InvalidUrl: the input is not a usable http/https URL
// - Fetch: the download failed (bad status, timeout, connection, ...)
// - Extraction: the page has no recognizable content
// - Write: a file could not be written
//
// main.rs maps each variant to its own exit code.
// =============================================================================

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Why a download failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered, but not with a 2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// No response within the configured timeout
    #[error("request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// DNS failure, refused connection, TLS handshake, ...
    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    /// The response started but the body could not be read
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    /// The HTTP client itself could not be built (e.g. bad user-agent)
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("fetch failed")]
    Fetch(#[from] FetchError),

    #[error("no content found in page from {url}")]
    Extraction { url: String },

    #[error("could not write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Process exit code for this error (0 is success, 2 is clap's usage error)
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::InvalidUrl { .. } => 2,
            ExportError::Fetch(_) => 3,
            ExportError::Extraction { .. } => 4,
            ExportError::Write { .. } => 5,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Write {
            path: path.into(),
            source,
        }
    }
}
