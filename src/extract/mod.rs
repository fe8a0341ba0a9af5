// src/extract/mod.rs
// =============================================================================
// This module isolates the main content of a downloaded page.
//
// Submodules:
// - flight: Markdown embedded in DeepWiki's Next.js data payload (preferred)
// - dom: main content containers of the rendered HTML (fallback)
//
// Both produce content blocks; the markdown module turns them into text.
// =============================================================================

mod dom;
mod flight;

use tracing::debug;

use crate::error::ExportError;
use dom::extract_dom_content;
use flight::extract_flight_markdown;

/// One unit of extracted content, destined to become one Markdown section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Text that is already Markdown
    Markdown(String),
    /// An HTML fragment still to be converted
    Html(String),
}

/// Extracts the content blocks of a page
///
/// Returns `ExportError::Extraction` when the page has neither an embedded
/// Markdown payload nor a recognizable content container.
pub fn extract_content(html: &str, source_url: &str) -> Result<Vec<ContentBlock>, ExportError> {
    let documents = extract_flight_markdown(html);
    if !documents.is_empty() {
        debug!("Using {} embedded Markdown document(s)", documents.len());
        return Ok(documents.into_iter().map(ContentBlock::Markdown).collect());
    }

    let fragments = extract_dom_content(html);
    if !fragments.is_empty() {
        debug!("Using {} HTML content block(s)", fragments.len());
        return Ok(fragments.into_iter().map(ContentBlock::Html).collect());
    }

    Err(ExportError::Extraction {
        url: source_url.to_string(),
    })
}
