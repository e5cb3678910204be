//! URL handling module for Sitetrawl
//!
//! This module provides seed parsing, site-root derivation, same-site
//! matching for domain scoping, and href resolution against a page URL.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::{authority, same_authority, site_root};
pub use resolve::{is_crawlable, parse_seed, resolve_href};
