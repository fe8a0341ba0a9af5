// src/extract/flight.rs
// =============================================================================
// This module pulls Markdown out of a DeepWiki page's Next.js data payload.
//
// DeepWiki pages are server-rendered by Next.js, which streams the page data
// to the browser through inline scripts of the form
//
//     <script>self.__next_f.push([1,"# Overview\n\nThis repository ..."])</script>
//
// The wiki pages travel as plain Markdown inside those JSON string literals,
// so we can take them verbatim instead of reverse-converting the rendered DOM.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

// Captures the JSON string literal of every `self.__next_f.push([1, "..."])`
static FLIGHT_PUSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"self\.__next_f\.push\(\[\s*1\s*,\s*("(?:[^"\\]|\\.)*")\s*\]\)"#)
        .expect("flight payload regex is valid")
});

// Returns the Markdown documents embedded in the page, in document order
//
// A payload counts as a document when it starts with a level-1 heading;
// everything else in the stream is React tree data. Exact duplicates are
// dropped (Next.js sometimes streams the same chunk twice).
pub fn extract_flight_markdown(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for captures in FLIGHT_PUSH.captures_iter(html) {
        let literal = &captures[1];

        let decoded: String = match serde_json::from_str(literal) {
            Ok(text) => text,
            Err(e) => {
                debug!("Skipping undecodable payload ({} bytes): {}", literal.len(), e);
                continue;
            }
        };

        let text = decoded.trim();
        if !is_markdown_document(text) {
            continue;
        }

        if seen.insert(text.to_string()) {
            documents.push(text.to_string());
        }
    }

    debug!("Found {} Markdown payload(s)", documents.len());
    documents
}

fn is_markdown_document(text: &str) -> bool {
    text.starts_with("# ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(payload: &str) -> String {
        format!(
            "<script>self.__next_f.push([1,{}])</script>",
            serde_json::to_string(payload).unwrap()
        )
    }

    #[test]
    fn test_extracts_markdown_payloads_in_order() {
        let html = format!(
            "<html><body>{}{}{}{}</body></html>",
            push("1:I[\"chunk\",[]]\n"),
            push("# Overview\n\nIntro text with \"quotes\"."),
            push("2:T1a4,"),
            push("# Architecture\n\n- one\n- two\n"),
        );

        let docs = extract_flight_markdown(&html);
        assert_eq!(
            docs,
            vec![
                "# Overview\n\nIntro text with \"quotes\".".to_string(),
                "# Architecture\n\n- one\n- two".to_string(),
            ]
        );
    }

    #[test]
    fn test_decodes_json_escapes() {
        let html = r##"<script>self.__next_f.push([1,"# Tést\n\n<div>"])</script>"##;
        assert_eq!(extract_flight_markdown(html), vec!["# Tést\n\n<div>".to_string()]);
    }

    #[test]
    fn test_skips_non_document_payloads() {
        let html = format!(
            "{}{}",
            push("## Not a page start"),
            r#"<script>self.__next_f.push([0])</script>"#
        );
        assert!(extract_flight_markdown(&html).is_empty());
    }

    #[test]
    fn test_drops_duplicates() {
        let html = format!("{}{}", push("# Same\n\nbody"), push("# Same\n\nbody"));
        assert_eq!(extract_flight_markdown(&html).len(), 1);
    }

    #[test]
    fn test_no_payloads() {
        assert!(extract_flight_markdown("<html><body><p>plain</p></body></html>").is_empty());
    }
}
