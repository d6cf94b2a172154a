// src/crawl/engine.rs
// =============================================================================
// This module implements the breadth-first traversal over linked documents.
//
// How one round works:
// 1. Every reference in the frontier is marked explored, synchronously,
//    before any task starts - so two identical references can never both
//    be scheduled
// 2. A fetch-and-extract task is built for each frontier member
// 3. The tasks run concurrently, at most max_workers at a time
// 4. The engine waits for ALL tasks of the round (the round barrier),
//    then merges their discoveries into the next frontier, minus anything
//    already explored
//
// A task can't fail the round: it either completes with its discoveries
// or reports why it was skipped. The crawl ends when a round produces an
// empty frontier (Exhausted) or the depth bound is hit (DepthReached).
//
// Rust concepts:
// - Generics: The engine is generic over its Fetcher, so tests drive it
//   with an in-memory fetcher instead of HTTP
// - buffer_unordered: Bounded concurrency over a stream of futures
// - HashSet: O(1) membership checks for the explored set
// =============================================================================

use std::collections::HashSet;
use std::path::PathBuf;

use futures::stream::{self, StreamExt};

use super::accumulator::ResultAccumulator;
use crate::fetch::{FetchOutcome, Fetcher};
use crate::identity::{DocumentReference, IdentityResolver};
use crate::report;
use crate::view;

// Placeholder recorded when no usable title could be extracted
pub const NO_TITLE: &str = "No Title";

// Why the crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// A round produced an empty next frontier - nothing left to explore
    Exhausted,
    /// The depth bound was hit while the frontier was still non-empty
    DepthReached,
}

// Tunables for one crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of BFS rounds to run
    pub max_depth: usize,
    /// Upper bound on concurrently running fetch-and-extract tasks
    pub max_workers: usize,
    /// Whether title extraction may fall back to heading elements
    pub speculative_titles: bool,
    /// When set, raw HTML of every fetched document is saved here
    pub download_folder: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: usize::MAX,
            max_workers: 4,
            speculative_titles: true,
            download_folder: None,
        }
    }
}

// What a single fetch-and-extract task produced
//
// Tasks never raise across the task boundary - a skipped item is a normal
// value the round coordinator consumes.
enum TaskOutcome {
    /// The document was processed; these references were discovered in it
    Completed { discovered: Vec<DocumentReference> },
    /// The document was not processed
    Skipped {
        reference: DocumentReference,
        reason: &'static str,
    },
}

// The BFS crawl engine
//
// Owns the frontier, the explored set and the result accumulator; the
// fetcher and resolver are injected so nothing here touches the network
// or global state directly.
pub struct Crawler<F> {
    fetcher: F,
    resolver: IdentityResolver,
    config: CrawlConfig,
    frontier: HashSet<DocumentReference>,
    explored: HashSet<DocumentReference>,
    results: ResultAccumulator,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(
        fetcher: F,
        resolver: IdentityResolver,
        config: CrawlConfig,
        seeds: impl IntoIterator<Item = DocumentReference>,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            config,
            frontier: seeds.into_iter().collect(),
            explored: HashSet::new(),
            results: ResultAccumulator::new(),
        }
    }

    // Runs the crawl to a terminal state
    //
    // Runs at most max_depth rounds; stops early as soon as a round leaves
    // the frontier empty. With max_depth = 0 no fetch is ever performed.
    pub async fn run(&mut self) -> CrawlOutcome {
        for _ in 0..self.config.max_depth {
            if self.frontier.is_empty() {
                return CrawlOutcome::Exhausted;
            }
            self.expand().await;
        }

        if self.frontier.is_empty() {
            CrawlOutcome::Exhausted
        } else {
            CrawlOutcome::DepthReached
        }
    }

    // Runs one BFS round: fetch the whole frontier, replace it with the
    // newly discovered references
    async fn expand(&mut self) {
        println!("🔎 {} document(s) to explore", self.frontier.len());

        // Mark every frontier member explored BEFORE any task runs. This
        // happens on the coordinating task, so references discovered by
        // sibling tasks mid-round can never race their way back in.
        let round: Vec<DocumentReference> = self.frontier.drain().collect();
        let mut tasks = Vec::new();
        for reference in round {
            self.explored.insert(reference.clone());
            tasks.push(process_reference(
                &self.fetcher,
                &self.resolver,
                &self.config,
                self.results.clone(),
                reference,
            ));
        }

        // Run the round with bounded parallelism. Collecting the whole
        // stream is the round barrier: nothing below this line happens
        // until every task of the round has resolved.
        let outcomes: Vec<TaskOutcome> = stream::iter(tasks)
            .buffer_unordered(self.config.max_workers.max(1))
            .collect()
            .await;

        // Merge the round's discoveries into the next frontier. Only the
        // coordinating task touches the explored set here, so this needs
        // no locking.
        let mut next = HashSet::new();
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Completed { discovered } => {
                    for reference in discovered {
                        if !self.explored.contains(&reference) {
                            next.insert(reference);
                        }
                    }
                }
                TaskOutcome::Skipped { reference, reason } => {
                    eprintln!(
                        "  Warning: skipping {}: {}",
                        reference.canonical_url(),
                        reason
                    );
                }
            }
        }

        self.frontier = next;
    }

    /// The accumulated results; meaningful once run() has returned
    pub fn results(&self) -> &ResultAccumulator {
        &self.results
    }

    /// How many references were dispatched over the whole crawl
    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }
}

// One fetch-and-extract task
//
// Free function rather than a method so each round can hold many of these
// futures while the engine still mutates its own sets.
//
// Steps: fetch raw HTML -> extract title (sentinel on miss) -> append to
// the accumulator -> optionally persist the raw HTML -> resolve outbound
// links into discovered references.
async fn process_reference<F: Fetcher>(
    fetcher: &F,
    resolver: &IdentityResolver,
    config: &CrawlConfig,
    results: ResultAccumulator,
    reference: DocumentReference,
) -> TaskOutcome {
    let html = match fetcher.fetch(&reference).await {
        FetchOutcome::Content(html) => html,
        FetchOutcome::Absent => {
            return TaskOutcome::Skipped {
                reference,
                reason: "document unreachable",
            }
        }
    };

    let title = view::extract_title(&html, config.speculative_titles)
        .unwrap_or_else(|| NO_TITLE.to_string());
    println!("  📄 {}", title);

    results.append(title.clone(), reference.canonical_url());

    // A failed download never affects the task's discoveries
    if let Some(folder) = &config.download_folder {
        if let Err(e) = report::save_raw_html(folder, &title, &reference, &html).await {
            eprintln!(
                "  Warning: could not save {}: {}",
                reference.canonical_url(),
                e
            );
        }
    }

    let discovered = view::extract_links(&html)
        .into_iter()
        .filter_map(|link| resolver.resolve(&link))
        .collect();

    TaskOutcome::Completed { discovered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // In-memory fetcher: serves canned pages and records every fetch
    struct StubFetcher {
        pages: HashMap<DocumentReference, String>,
        calls: Arc<Mutex<Vec<DocumentReference>>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<(DocumentReference, String)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn fetch_count(&self, reference: &DocumentReference) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|r| *r == reference)
                .count()
        }

        fn total_fetches(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, reference: &DocumentReference) -> FetchOutcome {
            self.calls.lock().unwrap().push(reference.clone());
            match self.pages.get(reference) {
                Some(html) => FetchOutcome::Content(html.clone()),
                None => FetchOutcome::Absent,
            }
        }
    }

    fn doc(id: &str) -> DocumentReference {
        DocumentReference::Document(id.to_string())
    }

    // Builds a minimal document page with a titled element and links
    fn page(title: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        format!(r#"<html><body><p class="title">{}</p>{}</body></html>"#, title, anchors)
    }

    fn doc_url(id: &str) -> String {
        format!("https://docs.google.com/document/d/{}/edit", id)
    }

    fn crawler(fetcher: StubFetcher, config: CrawlConfig, seeds: Vec<DocumentReference>) -> Crawler<StubFetcher> {
        Crawler::new(fetcher, IdentityResolver::new(true), config, seeds)
    }

    #[tokio::test]
    async fn test_single_document_without_links() {
        let fetcher = StubFetcher::new(vec![(doc("ABC"), page("Hello", &[]))]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("ABC")]);

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::Exhausted);
        let results = crawler.results().snapshot();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Hello");
        assert_eq!(results[0].url, "https://docs.google.com/document/d/ABC");
    }

    #[tokio::test]
    async fn test_absent_seed_yields_no_results() {
        let fetcher = StubFetcher::new(vec![]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("GONE")]);

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::Exhausted);
        assert!(crawler.results().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_max_depth_zero_never_fetches() {
        let fetcher = StubFetcher::new(vec![(doc("ABC"), page("Hello", &[]))]);
        let config = CrawlConfig {
            max_depth: 0,
            ..CrawlConfig::default()
        };
        let mut crawler = crawler(fetcher, config, vec![doc("ABC")]);

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::DepthReached);
        assert_eq!(crawler.fetcher.total_fetches(), 0);
        assert!(crawler.results().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_fetches_each_once() {
        // A links to B, B links back to A - the explored set breaks the loop
        let fetcher = StubFetcher::new(vec![
            (doc("A"), page("Page A", &[&doc_url("B")])),
            (doc("B"), page("Page B", &[&doc_url("A")])),
        ]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("A")]);

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::Exhausted);
        assert_eq!(crawler.fetcher.fetch_count(&doc("A")), 1);
        assert_eq!(crawler.fetcher.fetch_count(&doc("B")), 1);
        assert_eq!(crawler.results().snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_document_reachable_via_many_paths_is_fetched_once() {
        // Both seeds link to C, and A even links to it twice
        let c_url = doc_url("C");
        let fetcher = StubFetcher::new(vec![
            (doc("A"), page("Page A", &[&c_url, &c_url])),
            (doc("B"), page("Page B", &[&c_url])),
            (doc("C"), page("Page C", &[])),
        ]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("A"), doc("B")]);

        crawler.run().await;

        assert_eq!(crawler.fetcher.fetch_count(&doc("C")), 1);
        // One row per document, even though C was reachable three ways
        assert_eq!(crawler.results().snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_sibling_does_not_halt_the_round() {
        let fetcher = StubFetcher::new(vec![(doc("OK"), page("Fine", &[]))]);
        let mut crawler = crawler(
            fetcher,
            CrawlConfig::default(),
            vec![doc("OK"), doc("BROKEN")],
        );

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::Exhausted);
        let results = crawler.results().snapshot();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Fine");
    }

    #[tokio::test]
    async fn test_depth_bound_stops_expansion() {
        // Chain A -> B -> C with room for only two rounds
        let fetcher = StubFetcher::new(vec![
            (doc("A"), page("Page A", &[&doc_url("B")])),
            (doc("B"), page("Page B", &[&doc_url("C")])),
            (doc("C"), page("Page C", &[])),
        ]);
        let config = CrawlConfig {
            max_depth: 2,
            ..CrawlConfig::default()
        };
        let mut crawler = crawler(fetcher, config, vec![doc("A")]);

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::DepthReached);
        assert_eq!(crawler.fetcher.fetch_count(&doc("C")), 0);
        assert_eq!(crawler.results().snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_redirect_wrapped_links_are_followed() {
        let wrapped = format!(
            "https://www.google.com/url?q={}&sa=D",
            doc_url("TARGET")
        );
        let fetcher = StubFetcher::new(vec![
            (doc("A"), page("Page A", &[&wrapped])),
            (doc("TARGET"), page("Found Me", &[])),
        ]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("A")]);

        crawler.run().await;

        assert_eq!(crawler.fetcher.fetch_count(&doc("TARGET")), 1);
    }

    #[tokio::test]
    async fn test_untitled_document_gets_sentinel() {
        let html = "<html><body><p>just text, no title anywhere</p></body></html>";
        let fetcher = StubFetcher::new(vec![(doc("X"), html.to_string())]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("X")]);

        crawler.run().await;

        let results = crawler.results().snapshot();
        assert_eq!(results[0].title, NO_TITLE);
    }

    #[tokio::test]
    async fn test_unresolvable_links_are_dropped_silently() {
        let fetcher = StubFetcher::new(vec![(
            doc("A"),
            page("Page A", &["https://example.com/elsewhere", "#fragment"]),
        )]);
        let mut crawler = crawler(fetcher, CrawlConfig::default(), vec![doc("A")]);

        let outcome = crawler.run().await;

        assert_eq!(outcome, CrawlOutcome::Exhausted);
        assert_eq!(crawler.fetcher.total_fetches(), 1);
    }
}
