// src/identity/resolve.rs
// =============================================================================
// This module turns raw URLs into typed document references.
//
// Resolution has two steps:
// 1. Unwrap the Google redirect service: links inside exported documents
//    point at www.google.com/url?q=<real-url>, so we substitute the real
//    target before matching
// 2. Match the URL against each enabled kind's canonical pattern, in a
//    fixed priority order (document before presentation)
//
// We use the `url` crate to:
// - Parse and validate URLs
// - Walk path segments instead of hand-rolling a regex
// - Decode the `q` query parameter
//
// Rust concepts:
// - Option<T>: "this URL is not a document we know" is None, not an error
// - Pattern matching on path segments
// =============================================================================

use url::Url;

// A typed reference to a single document on the host service
//
// Each variant is one supported document kind; the String inside is the
// opaque id that uniquely identifies the document within its kind.
//
// Equality and hashing are structural, so two references with the same
// kind and id are the same document - HashSet dedup relies on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentReference {
    /// A Google Docs text document
    Document(String),
    /// A Google Slides presentation
    Presentation(String),
}

impl DocumentReference {
    /// The opaque id of the referenced document
    pub fn id(&self) -> &str {
        match self {
            DocumentReference::Document(id) => id,
            DocumentReference::Presentation(id) => id,
        }
    }

    // The canonical URL for this reference - the inverse of resolve()
    //
    // This is the URL we report to the user, not the one we fetch.
    //
    // Example:
    //   Document("ABC") -> "https://docs.google.com/document/d/ABC"
    pub fn canonical_url(&self) -> String {
        match self {
            DocumentReference::Document(id) => {
                format!("https://docs.google.com/document/d/{}", id)
            }
            DocumentReference::Presentation(id) => {
                format!("https://docs.google.com/presentation/d/{}", id)
            }
        }
    }

    // The URL the fetcher downloads raw HTML from
    //
    // Documents have a dedicated HTML export endpoint. Presentations have
    // no equivalent export feed, so we fetch the public embed page instead.
    pub fn export_url(&self) -> String {
        match self {
            DocumentReference::Document(id) => format!(
                "https://docs.google.com/feeds/download/documents/export/Export?id={}&exportFormat=html",
                id
            ),
            DocumentReference::Presentation(id) => {
                format!("https://docs.google.com/presentation/d/{}/embed", id)
            }
        }
    }
}

// Maps raw URLs to DocumentReferences
//
// Holds the kind-enablement configuration: when presentation crawling is
// disabled, presentation URLs are treated as unrecognized.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    allow_presentations: bool,
}

impl IdentityResolver {
    pub fn new(allow_presentations: bool) -> Self {
        Self { allow_presentations }
    }

    // Resolves a raw URL to a typed reference
    //
    // Returns None for anything that isn't a recognized (and enabled)
    // document URL: other hosts, malformed URLs, disabled kinds.
    //
    // Examples:
    //   "https://docs.google.com/document/d/ABC/edit" -> Some(Document("ABC"))
    //   "https://www.google.com/url?q=https%3A%2F%2Fdocs.google.com%2Fdocument%2Fd%2FX"
    //       -> Some(Document("X"))
    //   "https://example.com" -> None
    pub fn resolve(&self, raw_url: &str) -> Option<DocumentReference> {
        let parsed = Url::parse(raw_url).ok()?;

        // Step 1: unwrap the redirect service if this is a wrapped link
        let target = match unwrap_google_redirect(&parsed) {
            Some(inner) => inner,
            None => parsed,
        };

        // Step 2: match against the canonical patterns
        if target.host_str() != Some("docs.google.com") {
            return None;
        }

        let mut segments = target.path_segments()?;

        // Kinds are tried in priority order: document first, then
        // presentation. The id is the segment right after "/d/", anything
        // after it (like "/edit") is ignored.
        match (segments.next(), segments.next(), segments.next()) {
            (Some("document"), Some("d"), Some(id)) if !id.is_empty() => {
                Some(DocumentReference::Document(id.to_string()))
            }
            (Some("presentation"), Some("d"), Some(id))
                if self.allow_presentations && !id.is_empty() =>
            {
                Some(DocumentReference::Presentation(id.to_string()))
            }
            _ => None,
        }
    }
}

// Unwraps a Google redirect-service link
//
// Links inside exported documents don't point at their target directly;
// they go through www.google.com/url?q=<target>. If this URL is such a
// wrapper, return the decoded target; otherwise return None.
//
// The `q` value comes back percent-decoded from query_pairs(), so the
// target parses like any normal URL.
fn unwrap_google_redirect(url: &Url) -> Option<Url> {
    if url.host_str() != Some("www.google.com") {
        return None;
    }

    let target = url
        .query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())?;

    Url::parse(&target).ok()
}
