/// Crawl engine phases
///
/// This module defines the states the engine moves through while processing
/// its frontier, and which transitions between them are legal.
use std::fmt;

/// A phase of the crawl engine's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Nothing has happened yet; the frontier is about to be seeded
    Idle,

    /// Popping the next frontier entry
    Dequeuing,

    /// Requesting the current URL
    Fetching,

    /// Deciding whether the response is JSON or HTML
    Classifying,

    /// Extracting content from an HTML page
    Extracting,

    /// Enqueuing the page's traversal candidates
    EnqueuingLinks,

    /// Frontier exhausted; results are final
    Done,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the engine may move from this phase to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        matches!(
            (self, next),
            (Idle, Dequeuing)
                | (Dequeuing, Dequeuing)
                | (Dequeuing, Fetching)
                | (Dequeuing, Done)
                | (Fetching, Classifying)
                | (Fetching, Dequeuing)
                | (Classifying, Extracting)
                | (Classifying, Dequeuing)
                | (Extracting, EnqueuingLinks)
                | (Extracting, Dequeuing)
                | (EnqueuingLinks, Dequeuing)
        )
    }

    /// Short lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dequeuing => "dequeuing",
            Self::Fetching => "fetching",
            Self::Classifying => "classifying",
            Self::Extracting => "extracting",
            Self::EnqueuingLinks => "enqueuing_links",
            Self::Done => "done",
        }
    }

    /// Returns all phases
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Idle,
            Self::Dequeuing,
            Self::Fetching,
            Self::Classifying,
            Self::Extracting,
            Self::EnqueuingLinks,
            Self::Done,
        ]
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
