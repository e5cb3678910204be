//! Breadth-first crawl frontier
//!
//! A plain FIFO queue of `(url, depth)` pairs. Deduplication lives in the
//! visited set of [`CrawlState`](crate::state::CrawlState), not here: the
//! frontier may hold the same URL more than once, and the engine discards
//! repeats when they are dequeued.

use std::collections::VecDeque;
use url::Url;

/// A URL waiting to be crawled, with its hop count from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}

/// FIFO queue of frontier entries
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Creates a frontier holding only the seed at depth 0
    pub fn with_seed(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(FrontierEntry::new(seed, 0));
        frontier
    }

    /// Appends an entry at the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    /// Removes the oldest entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Returns the number of queued entries
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
