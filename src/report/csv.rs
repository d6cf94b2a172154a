// src/report/csv.rs
// =============================================================================
// This module writes the final crawl report as a CSV file.
//
// Format: a "title,link" header row, then one row per accumulated result
// in accumulation order. Document titles are arbitrary user text, so
// fields are escaped per RFC 4180: anything containing a comma, a quote
// or a line break is wrapped in double quotes, with embedded quotes
// doubled.
//
// The report is tiny (two columns), so the rows are assembled in memory
// and written in one shot.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};

use crate::crawl::CrawlResult;

// Writes the CSV report
//
// An unwritable path is a resource-level failure: it propagates (with the
// path attached for the error message) instead of being swallowed.
pub fn write_report(path: &Path, results: &[CrawlResult]) -> Result<()> {
    let mut report = String::from("title,link\n");

    for result in results {
        report.push_str(&escape_field(&result.title));
        report.push(',');
        report.push_str(&escape_field(&result.url));
        report.push('\n');
    }

    std::fs::write(path, report)
        .with_context(|| format!("could not write report to {}", path.display()))?;

    Ok(())
}

// Escapes one CSV field per RFC 4180
fn escape_field(field: &str) -> String {
    let needs_quoting = field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r');

    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
