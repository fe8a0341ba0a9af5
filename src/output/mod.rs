// src/output/mod.rs
// =============================================================================
// This module handles everything that touches the filesystem.
//
// Submodules:
// - paths: derives output file names from the URL and CLI arguments
// - writer: writes text (in a chosen encoding) or raw bytes
// - split: one-file-per-section output
// =============================================================================

mod paths;
mod split;
mod writer;

pub use paths::OutputPaths;
pub use split::write_chapters;
pub use writer::{write_bytes, write_text};
