// src/markdown/mod.rs
// =============================================================================
// This module produces the Markdown we write.
//
// Submodules:
// - assemble: converts content blocks and joins them with the separator
// - title: finds a section's first heading (used to name chapter files)
// =============================================================================

mod assemble;
mod title;

pub use assemble::{assemble_markdown, render_sections, unescape_separator, DEFAULT_SEPARATOR};
pub use title::first_heading;
