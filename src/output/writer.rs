// src/output/writer.rs
// =============================================================================
// This module writes output files.
//
// - Parent directories are created as needed
// - Text is encoded with the requested encoding (unmappable characters are
//   replaced, never an error)
// - Every filesystem failure becomes ExportError::Write with the path
// =============================================================================

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::error::ExportError;

/// Writes `text` to `path` in the given encoding
pub fn write_text(path: &Path, text: &str, encoding: &'static Encoding) -> Result<(), ExportError> {
    let (bytes, used, had_unmappable) = encoding.encode(text);

    // encoding_rs only encodes to ASCII-compatible encodings (UTF-16 -> UTF-8)
    if used != encoding {
        warn!("Cannot write {}; writing {} as {}", encoding.name(), path.display(), used.name());
    }
    if had_unmappable {
        warn!(
            "Some characters cannot be represented in {} and were replaced in {}",
            used.name(),
            path.display()
        );
    }

    write_bytes(path, &bytes)
}

/// Writes raw bytes to `path`
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    ensure_parent(path)?;
    fs::write(path, bytes).map_err(|e| ExportError::write(path, e))?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| ExportError::write(parent, e))?;
            debug!("Created directory {}", parent.display());
            Ok(())
        }
        _ => Ok(()),
    }
}
