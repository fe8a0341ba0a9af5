// src/github/normalize.rs
// =============================================================================
// This module turns the URL the user typed into the URL we download.
//
// Strategy:
// - Parse the input with the `url` crate and reject anything that is not an
//   absolute http/https URL
// - If it points at a GitHub repository (github.com/owner/repo/...), move
//   the same path onto the DeepWiki host
// - Everything else (DeepWiki pages included) passes through untouched
//
// DeepWiki mirrors GitHub's URL layout: github.com/owner/repo/page has its
// wiki at deepwiki.com/owner/repo/page.
// =============================================================================

use tracing::debug;
use url::Url;

use crate::error::ExportError;

/// Where GitHub repository URLs are rewritten to
pub const DEEPWIKI_BASE_URL: &str = "https://deepwiki.com/";

// Hosts that serve GitHub repositories
const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Rewrites GitHub repository URLs onto a DeepWiki base URL
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    deepwiki_base: Url,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        // DEEPWIKI_BASE_URL is a constant and known to be valid
        let deepwiki_base = Url::parse(DEEPWIKI_BASE_URL).expect("DEEPWIKI_BASE_URL is a valid URL");
        Self { deepwiki_base }
    }
}

impl UrlNormalizer {
    /// Uses `deepwiki_base` instead of the public DeepWiki host
    #[cfg(test)]
    pub fn with_base(deepwiki_base: Url) -> Self {
        Self { deepwiki_base }
    }

    /// Normalizes a user-supplied URL
    ///
    /// Returns the DeepWiki URL for GitHub repository URLs and the input
    /// itself for every other http/https URL.
    ///
    /// Example:
    ///   "https://github.com/rust-lang/rust/1-overview"
    ///     -> "https://deepwiki.com/rust-lang/rust/1-overview"
    pub fn normalize(&self, input: &str) -> Result<String, ExportError> {
        let url = parse_http_url(input)?;

        let Some(repo) = parse_github_url(&url) else {
            debug!("Using URL as-is: {}", input);
            return Ok(input.to_string());
        };

        let rewritten = self.rewrite(&url, &repo);
        debug!("Rewrote GitHub URL {} to {}", input, rewritten);
        Ok(rewritten.to_string())
    }

    fn rewrite(&self, original: &Url, repo: &GithubRepo) -> Url {
        let mut segments = vec![repo.owner.as_str(), repo.repo.as_str()];
        segments.extend(repo.rest.iter().map(String::as_str));

        // Segments are still percent-encoded, so set_path keeps them intact
        let base_path = self.deepwiki_base.path().trim_end_matches('/');
        let mut rewritten = self.deepwiki_base.clone();
        rewritten.set_path(&format!("{}/{}", base_path, segments.join("/")));
        rewritten.set_query(original.query());
        rewritten.set_fragment(original.fragment());
        rewritten
    }
}

// Parses `input` as an absolute http or https URL
fn parse_http_url(input: &str) -> Result<Url, ExportError> {
    let invalid = |reason: String| ExportError::InvalidUrl {
        url: input.to_string(),
        reason,
    };

    let url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

// The pieces of a GitHub repository URL
#[derive(Debug, PartialEq)]
struct GithubRepo {
    owner: String,
    repo: String,
    // Anything after owner/repo, e.g. ["tree", "main", "src"]
    rest: Vec<String>,
}

// Matches a GitHub repository URL
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - http://www.github.com/owner/repo/some/page
//
// Returns None for other hosts and for GitHub URLs without owner/repo
// (e.g. https://github.com/owner).
fn parse_github_url(url: &Url) -> Option<GithubRepo> {
    let host = url.host_str()?;
    if !GITHUB_HOSTS.contains(&host) {
        return None;
    }

    let parts: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    if parts.len() < 2 {
        return None;
    }

    let owner = parts[0].to_string();
    // Remove .git suffix if present (clone URLs)
    let repo = parts[1].trim_end_matches(".git").to_string();
    if repo.is_empty() {
        return None;
    }

    Some(GithubRepo {
        owner,
        repo,
        rest: parts[2..].iter().map(|s| s.to_string()).collect(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why parse with Url instead of trimming "https://" off a string?
//    - Url normalizes the host (GitHub.com == github.com), splits the path
//      into segments and keeps query/fragment apart for us
//    - It also tells us when the input is not a URL at all
//
// 2. What is let-else?
//    - `let Some(repo) = ... else { return ... };` binds `repo` if the
//      pattern matches and runs the else block (which must return) if not
//    - It keeps the "happy path" unindented
//
// 3. Why return the input String unchanged for non-GitHub URLs?
//    - Url::parse would add a trailing slash to "https://example.com",
//      and we promise to pass those URLs through untouched
// -----------------------------------------------------------------------------
