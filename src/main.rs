// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve the seed URLs into typed document references
// 3. Run the BFS crawl to a terminal state
// 4. Write the CSV report and print a summary
//
// Per-document problems (unreachable, no title, bad links) are handled
// inside the crawl and never reach this file; anything that DOES bubble up
// here is a resource-level failure (unwritable report, bad download
// folder) and terminates the process with a visible message.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod crawl;     // src/crawl/ - BFS traversal engine and result accumulator
mod fetch;     // src/fetch/ - document fetching over HTTP
mod identity;  // src/identity/ - URL <-> document reference mapping
mod report;    // src/report/ - CSV report and raw HTML downloads
mod view;      // src/view/ - title and link extraction from HTML

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use crawl::{CrawlConfig, CrawlOutcome, Crawler};
use fetch::HttpFetcher;
use identity::IdentityResolver;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // There are no distinguished exit codes: success is 0, any top-level
    // failure prints its message and exits 1
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let resolver = IdentityResolver::new(!cli.skip_presentations);

    // Resolve the seed URLs. A seed that matches no known document pattern
    // is dropped with a warning; it's not an error (the crawl just starts
    // from whatever did resolve, possibly nothing).
    let mut seeds = Vec::new();
    for seed in &cli.seeds {
        match resolver.resolve(seed) {
            Some(reference) => seeds.push(reference),
            None => eprintln!("Warning: not a recognized document URL, ignoring: {}", seed),
        }
    }

    // The download folder is a resource the whole run depends on, so
    // failing to create it is fatal - unlike the per-document writes later
    if let Some(folder) = &cli.download_folder {
        std::fs::create_dir_all(folder)
            .with_context(|| format!("could not create download folder {}", folder.display()))?;
    }

    println!("🔍 Crawling from {} seed document(s)", seeds.len());

    let config = CrawlConfig {
        max_depth: cli.max_depth,
        max_workers: cli.max_workers,
        speculative_titles: cli.allow_speculative_title_detection,
        download_folder: cli.download_folder.clone(),
    };

    let fetcher = HttpFetcher::new()?;
    let mut crawler = Crawler::new(fetcher, resolver, config, seeds);

    let outcome = crawler.run().await;

    let results = crawler.results().snapshot();
    report::write_report(&cli.output, &results)?;

    // Print summary
    println!();
    println!("📊 Summary:");
    println!("   🌐 Documents explored: {}", crawler.explored_count());
    println!("   📄 Titles recorded: {}", results.len());
    match outcome {
        CrawlOutcome::Exhausted => {
            println!("   ✅ Finished: no documents left to explore");
        }
        CrawlOutcome::DepthReached => {
            println!("   ⏹️  Stopped: depth limit reached");
        }
    }
    println!("   📋 Report written to {}", cli.output.display());

    Ok(())
}
