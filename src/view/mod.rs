// src/view/mod.rs
// =============================================================================
// This module is the crawler's read-only view over fetched document HTML.
//
// Submodules:
// - html: title extraction policy and outbound link enumeration
//
// The crawl engine never touches the DOM itself - it only sees what this
// module exposes: a best-effort title and a list of raw link strings.
// Resolving those strings to document references is the identity module's
// job, and deduplicating them is the engine's job.
// =============================================================================

mod html;

// Re-export the public API
pub use html::{extract_links, extract_title};
