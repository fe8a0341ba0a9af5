// src/fetch/mod.rs
// =============================================================================
// This module downloads the page we export.
//
// Submodules:
// - http: the single GET request, error classification and body decoding
// =============================================================================

mod http;

pub use http::{fetch_page, FetchOptions, DEFAULT_TIMEOUT_SECS};
