// src/view/html.rs
// =============================================================================
// This module extracts titles and outbound links from document HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Title policy, evaluated in order, stopping at the first hit:
// 1. An element carrying the "title" class - the marker Google's HTML
//    export puts on the document title paragraph
// 2. The <title> element, with the " - Google Docs" / " - Google Slides"
//    suffix stripped when present
// 3. If speculative detection is enabled: the first <h1>, then the
//    first <h2> (a positional heuristic, nothing more)
//
// If all of these miss, the caller substitutes the "No Title" sentinel.
// =============================================================================

use scraper::{Html, Selector};

// Suffixes Google appends to the <title> element of exported documents
const TITLE_SUFFIXES: [&str; 2] = [" - Google Docs", " - Google Slides"];

// Extracts a best-effort title from document HTML
//
// Parameters:
//   html: the raw HTML to inspect
//   speculative: whether the heading-based fallback may run
//
// Returns: Some(title) or None when no usable title was found
// (whitespace-only candidates count as "not found")
pub fn extract_title(html: &str, speculative: bool) -> Option<String> {
    let document = Html::parse_document(html);

    // 1. The canonical title marker
    if let Some(title) = first_text(&document, ".title") {
        return Some(title);
    }

    // 2. The document's <title> metadata, minus the service suffix
    if let Some(raw) = first_text(&document, "title") {
        let stripped = strip_service_suffix(&raw);
        if !stripped.is_empty() {
            return Some(stripped.to_string());
        }
    }

    // 3. Speculative fallback: largest heading first, then the next size
    if speculative {
        for selector in ["h1", "h2"] {
            if let Some(title) = first_text(&document, selector) {
                return Some(title);
            }
        }
    }

    None
}

// Extracts every hyperlink target from document HTML
//
// The output is raw and unfiltered: relative links, duplicates and
// self-links all pass through. Resolution happens in the identity module
// and deduplication in the crawl engine.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selector is a constant and known
    // to be valid.
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

// Returns the trimmed text of the first element matching the selector,
// or None if there is no match or the text is empty
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    let element = document.select(&selector).next()?;

    // .text() yields every text node under the element; joining them
    // flattens nested markup like <span> runs inside the title
    let text = element.text().collect::<String>().trim().to_string();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// Strips the trailing " - Google Docs" / " - Google Slides" suffix
fn strip_service_suffix(title: &str) -> &str {
    for suffix in TITLE_SUFFIXES {
        if let Some(stripped) = title.strip_suffix(suffix) {
            return stripped.trim_end();
        }
    }
    title
}
