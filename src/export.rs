// src/export.rs
// =============================================================================
// The export pipeline.
//
// Normalize URL -> fetch page -> extract content -> assemble Markdown -> write
//
// Strictly sequential: each step needs the previous one's result, and
// nothing is written to disk until extraction has succeeded, so a failed
// run leaves no files behind.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::extract::extract_content;
use crate::fetch::{fetch_page, FetchOptions, DEFAULT_TIMEOUT_SECS};
use crate::github::UrlNormalizer;
use crate::markdown::{assemble_markdown, render_sections, unescape_separator, DEFAULT_SEPARATOR};
use crate::output::{write_bytes, write_chapters, write_text, OutputPaths};

/// Everything one export needs to know
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// GitHub or DeepWiki URL, as given by the user
    pub url: String,
    /// Markdown file or directory (None: current directory)
    pub output: Option<PathBuf>,
    pub keep_html: bool,
    /// HTML file or directory (None: next to the Markdown file)
    pub html_output: Option<PathBuf>,
    /// Placed between content blocks (already unescaped)
    pub separator: String,
    pub html_encoding: &'static Encoding,
    /// None: same as html_encoding
    pub md_encoding: Option<&'static Encoding>,
    pub user_agent: Option<String>,
    pub timeout: Duration,
    /// Also write one file per section into this directory
    pub split_dir: Option<PathBuf>,
}

impl ExportRequest {
    /// A request with the CLI's default options
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output: None,
            keep_html: false,
            html_output: None,
            separator: unescape_separator(DEFAULT_SEPARATOR),
            html_encoding: UTF_8,
            md_encoding: None,
            user_agent: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            split_dir: None,
        }
    }

    fn markdown_encoding(&self) -> &'static Encoding {
        self.md_encoding.unwrap_or(self.html_encoding)
    }
}

/// What a successful export produced
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// The URL that was actually downloaded
    pub download_url: String,
    pub markdown_path: PathBuf,
    pub html_path: Option<PathBuf>,
    pub chapter_paths: Vec<PathBuf>,
    /// Number of content blocks found on the page
    pub blocks: usize,
}

/// Runs export requests
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    normalizer: UrlNormalizer,
}

impl Exporter {
    #[cfg(test)]
    pub fn with_normalizer(normalizer: UrlNormalizer) -> Self {
        Self { normalizer }
    }

    /// Runs the whole pipeline for one request
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportReport, ExportError> {
        let download_url = self.normalizer.normalize(&request.url)?;

        let paths = OutputPaths::resolve(
            &request.url,
            request.output.as_deref(),
            request.keep_html,
            request.html_output.as_deref(),
            request.split_dir.as_deref(),
        );
        debug!("Output paths: {:?}", paths);
        if !request.keep_html && request.html_output.is_some() {
            debug!("--html-output has no effect without --keep-html");
        }

        info!("Downloading {}", download_url);
        let options = FetchOptions {
            timeout: request.timeout,
            user_agent: request.user_agent.clone(),
            encoding: request.html_encoding,
        };
        let document = fetch_page(&download_url, &options).await?;
        debug!(
            "Fetched {} ({} bytes, decoded as {})",
            document.url,
            document.bytes.len(),
            document.encoding.name()
        );

        let blocks = extract_content(&document.html, &download_url)?;
        debug!("Extracted {} content block(s)", blocks.len());

        let markdown = assemble_markdown(&blocks, &request.separator);
        let md_encoding = request.markdown_encoding();

        write_text(&paths.markdown, &markdown, md_encoding)?;
        info!("Saved Markdown to {}", paths.markdown.display());

        if let Some(html_path) = &paths.html {
            write_bytes(html_path, &document.bytes)?;
            info!("Saved original HTML to {}", html_path.display());
        }

        let chapter_paths = match &paths.split_dir {
            Some(dir) => write_chapters(dir, &render_sections(&blocks), md_encoding)?,
            None => Vec::new(),
        };

        Ok(ExportReport {
            download_url,
            markdown_path: paths.markdown,
            html_path: paths.html,
            chapter_paths,
            blocks: blocks.len(),
        })
    }
}
