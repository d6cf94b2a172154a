// src/crawl/accumulator.rs
// =============================================================================
// This module collects crawl results from concurrently running tasks.
//
// Every worker task of a round appends into the same accumulator, so it
// has to be safe under concurrent access. We wrap the list in
// Arc<Mutex<..>>:
// - Arc lets every task hold a handle to the same list
// - Mutex serializes the appends
//
// The lock is only ever held for a push or a clone, never across an
// .await, so a std::sync::Mutex is the right tool (no async mutex needed).
//
// Rust concepts:
// - Arc<T>: Atomically reference-counted shared ownership
// - Mutex<T>: Mutual exclusion around the data it owns
// =============================================================================

use std::sync::{Arc, Mutex};

// One accumulated crawl result: the extracted title and the document's
// canonical URL. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    pub title: String,
    pub url: String,
}

// Thread-safe collection of crawl results
//
// Cloning the accumulator clones the handle, not the list - every clone
// appends into the same underlying Vec.
#[derive(Debug, Clone, Default)]
pub struct ResultAccumulator {
    results: Arc<Mutex<Vec<CrawlResult>>>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    // Appends one result
    //
    // Safe to call from any in-flight task. Results within one round land
    // in completion order; no ordering is guaranteed among them.
    pub fn append(&self, title: String, url: String) {
        let mut results = self.results.lock().expect("result list lock poisoned");
        results.push(CrawlResult { title, url });
    }

    // Clones the accumulated results out
    //
    // Meant to be read once the crawl has reached a terminal state; the
    // returned Vec is in accumulation order.
    pub fn snapshot(&self) -> Vec<CrawlResult> {
        self.results
            .lock()
            .expect("result list lock poisoned")
            .clone()
    }
}
