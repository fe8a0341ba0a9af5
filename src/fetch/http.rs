// src/fetch/http.rs
// =============================================================================
// This module downloads a single page.
//
// Key functionality:
// - One GET request, bounded by the configured timeout, no retries
// - Browser-like User-Agent by default (overridable from the CLI)
// - Non-2xx responses, timeouts and connection failures become FetchError
// - The body is decoded with the requested encoding; the raw bytes are kept
//   so --keep-html can write the document verbatim
// =============================================================================

use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Sent when the user does not pass --user-agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one download
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    /// None means DEFAULT_USER_AGENT
    pub user_agent: Option<String>,
    /// Encoding used to decode the response body
    pub encoding: &'static Encoding,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            encoding: UTF_8,
        }
    }
}

/// A downloaded page
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// The URL that was requested
    pub url: String,
    /// Response body exactly as received
    pub bytes: Vec<u8>,
    /// Body decoded to text
    pub html: String,
    /// Encoding the body was decoded with (a BOM overrides the requested one)
    pub encoding: &'static Encoding,
}

// Downloads `url` with a single GET request
//
// Parameters:
//   url: the (already normalized) URL
//   options: timeout, user agent and body encoding
//
// Returns: the fetched document, or a FetchError describing what went wrong
pub async fn fetch_page(url: &str, options: &FetchOptions) -> Result<FetchedDocument, FetchError> {
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))?;

    debug!("GET {} (timeout {:?}, user agent {:?})", url, options.timeout, user_agent);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| categorize_error(url, options.timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            categorize_error(url, options.timeout, e)
        } else {
            FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let (html, used_encoding) = decode_body(&bytes, options.encoding);
    debug!(
        "Downloaded {} bytes ({} characters as {})",
        bytes.len(),
        html.chars().count(),
        used_encoding.name()
    );

    Ok(FetchedDocument {
        url: url.to_string(),
        bytes: bytes.to_vec(),
        html,
        encoding: used_encoding,
    })
}

// Decodes a response body, replacing malformed sequences with U+FFFD
fn decode_body(bytes: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding) {
    let (text, used, had_errors) = encoding.decode(bytes);

    if used != encoding {
        debug!("Byte order mark selected {} over {}", used.name(), encoding.name());
    }
    if had_errors {
        warn!(
            "Response is not valid {}; malformed bytes were replaced",
            used.name()
        );
    }

    (text.into_owned(), used)
}

// Categorizes the reqwest errors that can happen before a response arrives
//
// - Network timeout
// - Too many redirects
// - DNS resolution failure, refused connection, TLS errors
fn categorize_error(url: &str, timeout: Duration, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
            seconds: timeout.as_secs(),
        };
    }

    let message = if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        error.to_string()
    };

    FetchError::Connect {
        url: url.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;

    #[tokio::test]
    async fn test_fetch_success_uses_default_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Owner/Repo")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html><body>hello</body></html>")
            .create_async()
            .await;

        let url = format!("{}/Owner/Repo", server.url());
        let doc = fetch_page(&url, &FetchOptions::default()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(doc.url, url);
        assert_eq!(doc.html, "<html><body>hello</body></html>");
        assert_eq!(doc.bytes, doc.html.as_bytes());
        assert_eq!(doc.encoding, UTF_8);
    }

    #[tokio::test]
    async fn test_fetch_custom_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "my-agent/1.0")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let options = FetchOptions {
            user_agent: Some("my-agent/1.0".to_string()),
            ..FetchOptions::default()
        };
        fetch_page(&format!("{}/", server.url()), &options).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_404_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing", server.url());
        let err = fetch_page(&url, &FetchOptions::default()).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/").with_status(503).create_async().await;

        let err = fetch_page(&format!("{}/", server.url()), &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { .. }));
    }

    #[tokio::test]
    async fn test_fetch_decodes_with_requested_encoding() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/latin")
            .with_status(200)
            .with_body(b"caf\xe9".to_vec())
            .create_async()
            .await;

        let options = FetchOptions {
            encoding: WINDOWS_1252,
            ..FetchOptions::default()
        };
        let doc = fetch_page(&format!("{}/latin", server.url()), &options)
            .await
            .unwrap();
        assert_eq!(doc.html, "café");
        assert_eq!(doc.bytes, b"caf\xe9");
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        // Accept the connection but never answer
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let options = FetchOptions {
            timeout: Duration::from_secs(1),
            ..FetchOptions::default()
        };
        let err = fetch_page(&format!("http://{}/", addr), &options)
            .await
            .unwrap_err();
        server.abort();

        assert!(
            matches!(err, FetchError::Timeout { seconds: 1, .. }),
            "expected timeout, got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Grab a free port, then close it again
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_page(&format!("http://{}/", addr), &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Connect { .. }), "got {:?}", err);
    }

    #[test]
    fn test_decode_body_replaces_malformed_utf8() {
        let (text, used) = decode_body(b"ok\xff", UTF_8);
        assert_eq!(text, "ok\u{FFFD}");
        assert_eq!(used, UTF_8);
    }
}
