// src/github/mod.rs
// =============================================================================
// This module handles everything that comes from github/gitignore.
//
// Submodules:
// - client: HTTP calls to the GitHub REST API (trees and blobs)
// - index: turns the tree listing into a language -> SHA map
// - blob: downloads and decodes a single template
// =============================================================================

mod blob;
mod client;
mod index;

// Re-export the pieces the driver and main.rs need
pub use blob::fetch_content;
pub use client::{GitHubClient, TemplateSource, DEFAULT_API_URL};
#[cfg(test)]
pub use client::{Blob, Tree, TreeEntry};
pub use index::{build_index, LanguageIndex};
