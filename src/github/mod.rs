// src/github/mod.rs
// =============================================================================
// This module maps GitHub repository URLs onto DeepWiki.
//
// Currently implements:
// - Validating that the input is an absolute http/https URL
// - Recognizing github.com/owner/repo[/...] URLs
// - Rewriting them to deepwiki.com/owner/repo[/...]
// =============================================================================

mod normalize;

pub use normalize::UrlNormalizer;
