//! Configuration module for Sitetrawl
//!
//! This module handles loading, parsing, and validating the crawl configuration.
//! Every field has a default, so an empty TOML file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use sitetrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ContentTypePreference, CrawlConfig, OutputFormat, DEFAULT_MAX_CONTENT_LENGTH};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
