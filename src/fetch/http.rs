// src/fetch/http.rs
// =============================================================================
// This module fetches document HTML over HTTP using reqwest.
//
// Key decisions:
// - One Client built up front and reused for every request, so connections
//   to the host are pooled instead of re-established per document
// - Redirects are NOT followed: a restricted or deleted document redirects
//   to a sign-in page, and following that would make the crawler record
//   the sign-in page as if it were the document. A redirect therefore
//   means "absent".
// - A request timeout so one hung document can't stall its whole round
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::{FetchOutcome, Fetcher};
use crate::identity::DocumentReference;

// Per-request timeout; generous because document exports can be large
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Fetches documents from their HTML export endpoints
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the fetcher and its HTTP client
    //
    // Client construction can fail (TLS backend initialization), which is
    // a resource-level failure - it propagates instead of being swallowed.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    // Fetches the raw HTML for a reference
    //
    // Every failure mode collapses to Absent:
    // - transport errors (DNS, connect, timeout)
    // - non-2xx status codes, including the 3xx a restricted document
    //   answers with (redirects are disabled on the client)
    // - body read errors
    async fn fetch(&self, reference: &DocumentReference) -> FetchOutcome {
        let response = match self.client.get(reference.export_url()).send().await {
            Ok(response) => response,
            Err(_) => return FetchOutcome::Absent,
        };

        if !response.status().is_success() {
            return FetchOutcome::Absent;
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Content(body),
            Err(_) => FetchOutcome::Absent,
        }
    }
}
