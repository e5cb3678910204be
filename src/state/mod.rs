//! State module for tracking crawl progress
//!
//! This module provides the state a single crawl invocation threads through
//! the engine.
//!
//! # Components
//!
//! - `CrawlPhase`: The engine's state-machine phases and their legal transitions
//! - `CrawlState`: Frontier, visited set and accumulated page records
//! - `CrawlStats`: Counters reported when the crawl finishes

mod crawl_state;
mod phase;

// Re-export main types
pub use crawl_state::{CrawlState, CrawlStats};
pub use phase::CrawlPhase;
