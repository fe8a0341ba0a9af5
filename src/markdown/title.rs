// src/markdown/title.rs
// =============================================================================
// Finds the title of a Markdown section: the text of its first heading.
//
// We use the `pulldown-cmark` crate, which parses Markdown into a stream of
// events (heading start, text, heading end, ...), so headings inside code
// blocks or with inline markup are handled correctly.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

// Returns the plain text of the first heading, if any
//
// Example:
//   "Intro\n\n## The `run` loop\n" -> Some("The run loop")
pub fn first_heading(markdown: &str) -> Option<String> {
    // Some(text) while we are inside a heading
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading(..)) => current = Some(String::new()),

            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = current.as_mut() {
                    title.push_str(&text);
                }
            }

            Event::End(Tag::Heading(..)) => {
                if let Some(title) = current.take() {
                    let title = title.trim();
                    if !title.is_empty() {
                        return Some(title.to_string());
                    }
                }
            }

            _ => {}
        }
    }

    None
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Event::Text | Event::Code in one arm?
//    - Both variants hold a CowStr, so one binding name works for either
//    - `## The \`run\` loop` produces Text("The "), Code("run"), Text(" loop")
//
// 2. In pulldown-cmark 0.9 the end event repeats the tag:
//    Event::End(Tag::Heading(..)); newer versions use TagEnd instead.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_heading() {
        assert_eq!(first_heading("# Overview\n\ntext"), Some("Overview".to_string()));
    }

    #[test]
    fn test_inline_markup_flattened() {
        assert_eq!(
            first_heading("Intro\n\n## The `run` *loop*\n"),
            Some("The run loop".to_string())
        );
    }

    #[test]
    fn test_heading_in_code_block_ignored() {
        let markdown = "```\n# not a heading\n```\n\n### Real\n";
        assert_eq!(first_heading(markdown), Some("Real".to_string()));
    }

    #[test]
    fn test_no_heading() {
        assert_eq!(first_heading("just a paragraph"), None);
    }
}
