// src/report/download.rs
// =============================================================================
// This module saves fetched documents to a local folder.
//
// When --download-folder is set, every successfully fetched document's raw
// HTML is written as <slug(title)>_<id>.html. The id suffix keeps files
// distinct even when two documents share a title (or have none at all).
//
// The slug rules: lowercase, spaces become hyphens, and everything that
// isn't an ASCII letter, digit or hyphen is dropped.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};

use crate::identity::DocumentReference;

// Turns a document title into a filesystem-safe slug
//
// Examples:
//   "Meeting Notes"  -> "meeting-notes"
//   "Q3: The Plan!"  -> "q3-the-plan"
pub fn slug_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

// Writes one document's raw HTML into the download folder
//
// Uses tokio's async file IO because this runs inside the in-flight
// fetch-and-extract tasks. The caller treats a failure here as a per-item
// warning, not a crawl error.
pub async fn save_raw_html(
    folder: &Path,
    title: &str,
    reference: &DocumentReference,
    html: &str,
) -> Result<()> {
    let filename = format!("{}_{}.html", slug_title(title), reference.id());
    let path = folder.join(filename);

    tokio::fs::write(&path, html)
        .await
        .with_context(|| format!("could not write {}", path.display()))?;

    Ok(())
}
