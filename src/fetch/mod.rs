// src/fetch/mod.rs
// =============================================================================
// This module defines how the crawler obtains raw document content.
//
// The crawl engine only knows the narrow contract below: give me the bytes
// for this reference, or tell me the document is absent. Everything about
// HTTP (clients, timeouts, status codes) stays inside the http submodule,
// and tests swap in an in-memory fetcher instead.
//
// Rust concepts:
// - Traits: The seam between the engine and the transport
// - async-trait: async functions are not directly allowed in traits, this
//   macro rewrites them into methods returning boxed futures
// =============================================================================

mod http;

pub use http::HttpFetcher;

use crate::identity::DocumentReference;
use async_trait::async_trait;

// What a fetch attempt produced
//
// The engine treats every non-success uniformly: there is no distinction
// between "404", "network down" and "redirected to a sign-in page" - the
// document is simply absent and the item is skipped. No retries.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The document's raw HTML
    Content(String),
    /// The document could not be retrieved
    Absent,
}

// The transport capability the crawl engine depends on
//
// Send + Sync bounds let implementations be shared across the worker
// tasks of a round.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, reference: &DocumentReference) -> FetchOutcome;
}
