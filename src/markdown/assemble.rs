// src/markdown/assemble.rs
// =============================================================================
// This module turns content blocks into the final Markdown text.
//
// - Markdown blocks are used as-is
// - HTML blocks are converted with the `html2md` crate
// - Blocks are joined with the separator (default: a thematic break)
// =============================================================================

use tracing::debug;

use crate::extract::ContentBlock;

/// Separator placed between blocks unless --separator says otherwise
pub const DEFAULT_SEPARATOR: &str = "\n---\n";

// Turns the two characters `\n` into a real newline
//
// Shells make it awkward to pass a literal newline, so
// `--separator '\n\n***\n\n'` is accepted instead.
pub fn unescape_separator(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Converts one block to Markdown
pub fn block_to_markdown(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Markdown(text) => text.clone(),
        ContentBlock::Html(fragment) => html2md::parse_html(fragment).trim().to_string(),
    }
}

// Converts every block, dropping blocks that end up empty
//
// Returns: one Markdown section per surviving block, in order
pub fn render_sections(blocks: &[ContentBlock]) -> Vec<String> {
    let sections: Vec<String> = blocks
        .iter()
        .map(block_to_markdown)
        .filter(|section| !section.trim().is_empty())
        .collect();

    if sections.len() != blocks.len() {
        debug!("Dropped {} empty block(s)", blocks.len() - sections.len());
    }
    sections
}

/// Converts the blocks and joins them with `separator`
///
/// Example: blocks [a, b, c] with separator S give a + S + b + S + c
pub fn assemble_markdown(blocks: &[ContentBlock], separator: &str) -> String {
    render_sections(blocks).join(separator)
}
