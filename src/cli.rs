// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The crawler has exactly one job, so there are no subcommands: the seed
// URLs are positional and everything else is a flag with a default.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "docs-crawler",
    version = "0.1.0",
    about = "A BFS crawler for publicly shared Google Docs",
    long_about = "docs-crawler starts from one or more seed document URLs, follows the links \
                  inside each document breadth-first, and writes a CSV report of every document \
                  it finds together with its title. Only publicly available documents are \
                  supported."
)]
pub struct Cli {
    /// Seed document URLs to start crawling from
    ///
    /// These are positional arguments (required, at least one)
    #[arg(required = true)]
    pub seeds: Vec<String>,

    /// Maximum crawl depth in BFS rounds
    ///
    /// Depth 1 = just the seed documents
    /// Depth 2 = seeds + all documents they link to
    /// etc. Unbounded when omitted.
    #[arg(long, default_value_t = usize::MAX, hide_default_value = true)]
    pub max_depth: usize,

    /// Path of the CSV report to write
    #[arg(short, long, default_value = "report.csv")]
    pub output: PathBuf,

    /// Whether title extraction may guess from heading elements
    ///
    /// When the document carries no explicit title, the first <h1> (then
    /// the first <h2>) is used as a best-effort stand-in. Pass
    /// --allow-speculative-title-detection=false to record "No Title"
    /// instead.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub allow_speculative_title_detection: bool,

    /// Folder to save the raw HTML of every fetched document into
    ///
    /// Files are named <slug-of-title>_<document-id>.html. The folder is
    /// created if it doesn't exist. Nothing is saved when omitted.
    #[arg(long)]
    pub download_folder: Option<PathBuf>,

    /// Don't crawl Google Slides presentations, only text documents
    #[arg(long)]
    pub skip_presentations: bool,

    /// Maximum number of documents fetched concurrently
    #[arg(long, default_value_t = 4)]
    pub max_workers: usize,
}
