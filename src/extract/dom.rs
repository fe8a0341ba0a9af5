// src/extract/dom.rs
// =============================================================================
// This module finds the main content region of a rendered HTML page.
//
// It is the fallback for pages without an embedded Markdown payload
// (older DeepWiki builds, mirrors, or non-DeepWiki URLs).
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// Strategy:
// - Try a fixed list of content selectors, most specific first
// - The first selector with non-empty matches wins; every top-level match
//   becomes one HTML block
// - Navigation, scripts, buttons and similar boilerplate are cut out
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

// Content containers, in priority order. DeepWiki renders each wiki page
// into a Tailwind `prose` container.
const CONTENT_SELECTORS: [&str; 5] = [
    "div.prose-custom",
    "div.prose",
    "article",
    "main",
    "[role='main']",
];

// Elements that never carry article text
const BOILERPLATE_SELECTOR: &str =
    "script, style, noscript, template, nav, aside, header, footer, button, svg, form";

// These selectors are constants and known to be valid
static CONTENT: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|s| (*s, Selector::parse(s).expect("content selector is valid")))
        .collect()
});

static BOILERPLATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(BOILERPLATE_SELECTOR).expect("boilerplate selector is valid"));

// Extracts the main content containers of a page as HTML fragments
//
// Parameters:
//   html: the full page
//
// Returns: one cleaned HTML fragment per content container, in document order,
// or an empty Vec if no selector matched anything with text in it
pub fn extract_dom_content(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    for (name, selector) in CONTENT.iter() {
        let matches: Vec<ElementRef> = document.select(selector).collect();
        if matches.is_empty() {
            continue;
        }

        // Nested matches (a div.prose inside another) are already covered
        // by their outermost match
        let ids: HashSet<_> = matches.iter().map(|el| el.id()).collect();
        let fragments: Vec<String> = matches
            .iter()
            .filter(|el| !el.ancestors().any(|a| ids.contains(&a.id())))
            .map(strip_boilerplate)
            .filter(|fragment| has_text(fragment))
            .collect();

        if !fragments.is_empty() {
            debug!("Content container '{}' matched {} block(s)", name, fragments.len());
            return fragments;
        }
    }

    debug!("No content container matched");
    Vec::new()
}

// Returns the container's inner HTML with boilerplate elements cut out
//
// scraper's tree is read-only, so we work on the serialized HTML: an
// element's own serialization is always a substring of its parent's.
fn strip_boilerplate(container: &ElementRef) -> String {
    let mut inner = container.inner_html();

    let junk: Vec<ElementRef> = container.select(&BOILERPLATE).collect();
    let junk_ids: HashSet<_> = junk.iter().map(|el| el.id()).collect();

    for element in &junk {
        // Removing the outermost boilerplate element removes its children too
        if element.ancestors().any(|a| junk_ids.contains(&a.id())) {
            continue;
        }
        inner = inner.replacen(&element.html(), "", 1);
    }

    inner.trim().to_string()
}

// True if the fragment has any visible text
fn has_text(fragment: &str) -> bool {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .any(|t| !t.trim().is_empty())
}
