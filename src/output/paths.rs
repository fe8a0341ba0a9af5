// src/output/paths.rs
// =============================================================================
// This module decides where the output files go.
//
// Rules:
// - No output path: a URL-derived name in the current directory
// - Output path is a directory (exists, or ends with '/'): URL-derived name
//   inside it
// - Anything else: the output path is the file
// - The HTML copy goes to --html-output (file or directory) or, by default,
//   next to the Markdown file as <stem>_original.html
//
// URL-derived names join the path segments with '-', so
// https://github.com/Owner/Repo/page becomes Owner-Repo-page.md.
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

// Longest file stem we derive from a URL
const MAX_STEM_LEN: usize = 100;

// Page extensions dropped from the last URL segment
const PAGE_EXTENSIONS: [&str; 5] = [".html", ".htm", ".md", ".php", ".aspx"];

// Runs of characters that are not safe in file names
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._-]+").expect("unsafe-chars regex is valid"));

static REPEATED_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("underscore regex is valid"));

/// Where each artifact of an export is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub markdown: PathBuf,
    /// Only set when --keep-html was given
    pub html: Option<PathBuf>,
    /// Directory for one-file-per-section output (--split-dir)
    pub split_dir: Option<PathBuf>,
}

impl OutputPaths {
    /// Resolves all output paths for one export
    ///
    /// Parameters:
    ///   url: the URL the user gave (names are derived from its path)
    ///   output: the OUTPUT_PATH argument
    ///   keep_html: whether the HTML copy is wanted at all
    ///   html_output: the --html-output argument (ignored without keep_html)
    ///   split_dir: the --split-dir argument
    pub fn resolve(
        url: &str,
        output: Option<&Path>,
        keep_html: bool,
        html_output: Option<&Path>,
        split_dir: Option<&Path>,
    ) -> Self {
        let markdown = resolve_target(output, url, ".md")
            .unwrap_or_else(|| PathBuf::from(derive_filename(url, ".md")));

        let html = keep_html.then(|| {
            resolve_target(html_output, url, ".html").unwrap_or_else(|| sibling_html_path(&markdown))
        });

        Self {
            markdown,
            html,
            split_dir: split_dir.map(Path::to_path_buf),
        }
    }
}

// Resolves a user-supplied file-or-directory path; None if not supplied
fn resolve_target(path: Option<&Path>, url: &str, extension: &str) -> Option<PathBuf> {
    let path = path?;
    if is_directory_like(path) {
        Some(path.join(derive_filename(url, extension)))
    } else {
        Some(path.to_path_buf())
    }
}

// An existing directory, or a path spelled like one ("out/")
fn is_directory_like(path: &Path) -> bool {
    path.is_dir() || path.to_string_lossy().ends_with(std::path::is_separator)
}

// page.md -> page_original.html, in the same directory
fn sibling_html_path(markdown: &Path) -> PathBuf {
    let stem = markdown
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());
    markdown.with_file_name(format!("{}_original.html", stem))
}

/// Derives a file name from a URL
///
/// The same URL always gives the same name.
///
/// Example:
///   ("https://deepwiki.com/Owner/Repo/1-overview", ".md") -> "Owner-Repo-1-overview.md"
pub fn derive_filename(url: &str, extension: &str) -> String {
    let base = match Url::parse(url) {
        Ok(parsed) => {
            let segments: Vec<&str> = parsed
                .path_segments()
                .map(|segments| segments.filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();

            if segments.is_empty() {
                parsed.host_str().unwrap_or_default().to_string()
            } else {
                strip_page_extension(&segments.join("-")).to_string()
            }
        }
        // Not a URL: sanitize the raw input
        Err(_) => url.to_string(),
    };

    let mut stem = sanitize_component(&base);
    if stem.len() > MAX_STEM_LEN {
        // Sanitized names are ASCII, so any byte index is a char boundary
        stem.truncate(MAX_STEM_LEN);
        stem = sanitize_component(&stem);
    }

    format!("{}{}", stem, extension)
}

fn strip_page_extension(name: &str) -> &str {
    PAGE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name)
}

/// Makes a string safe to use as (part of) a file name
///
/// Unsafe character runs become '_', leading and trailing '.'/'_' are
/// removed, and an empty result becomes "untitled".
pub fn sanitize_component(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    let collapsed = REPEATED_UNDERSCORES.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches(|c: char| c == '.' || c == '_');

    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
