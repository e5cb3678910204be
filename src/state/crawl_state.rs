use crate::crawler::{Frontier, FrontierEntry, PageRecord};
use std::collections::HashSet;
use url::Url;

/// Counters for one crawl, logged when it finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages that produced a record
    pub recorded: usize,

    /// URLs skipped because the fetch or JSON parse failed
    pub failed: usize,

    /// Frontier entries dropped because they were already visited or too deep
    pub discarded: usize,
}

/// Everything a single crawl accumulates
///
/// Owned by exactly one engine run and consumed when the crawl is done.
#[derive(Debug)]
pub struct CrawlState {
    frontier: Frontier,
    visited: HashSet<String>,
    results: Vec<PageRecord>,
    stats: CrawlStats,
}

impl CrawlState {
    /// Creates state whose frontier holds only the seed at depth 0
    pub fn new(seed: Url) -> Self {
        Self {
            frontier: Frontier::with_seed(seed),
            visited: HashSet::new(),
            results: Vec::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Adds an extra depth-0 seed behind everything already queued
    pub fn add_seed(&mut self, url: Url) {
        self.frontier.push(FrontierEntry::new(url, 0));
    }

    /// Pops the next frontier entry
    pub fn next_entry(&mut self) -> Option<FrontierEntry> {
        self.frontier.pop()
    }

    /// Returns true if the URL has already been dequeued for processing
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Records the URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Enqueues a discovered link unless it has been visited
    ///
    /// Returns true if the link was queued.
    pub fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if self.is_visited(&url) {
            return false;
        }
        self.frontier.push(FrontierEntry::new(url, depth));
        true
    }

    /// Appends a page record
    pub fn push_result(&mut self, record: PageRecord) {
        self.results.push(record);
        self.stats.recorded += 1;
    }

    /// Counts a URL skipped by a fetch or parse failure
    pub fn record_failure(&mut self) {
        self.stats.failed += 1;
    }

    /// Counts a frontier entry dropped without fetching
    pub fn record_discard(&mut self) {
        self.stats.discarded += 1;
    }

    /// Returns the number of entries still queued
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    /// Consumes the state, returning the page records in crawl order
    pub fn into_results(self) -> Vec<PageRecord> {
        self.results
    }
}
