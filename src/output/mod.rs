//! Output module for projecting crawl results
//!
//! This module handles:
//! - Projecting page records into the configured output format
//! - Flattening records into a single text blob
//! - Building one table row per record
//! - The two views a host consumes (structured payload and table rows)

mod table;
mod text;

pub use table::{table_view, TableRow};
pub use text::flatten;

use crate::config::OutputFormat;
use crate::crawler::PageRecord;
use serde::Serialize;
use serde_json::{json, Value};

/// A crawl result projected into one output shape
///
/// Serializes untagged: a list of records, a string, or a list of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Structured(Vec<PageRecord>),
    FlatText(String),
    Table(Vec<TableRow>),
}

/// Projects page records into the requested format
///
/// # Arguments
///
/// * `records` - Page records in crawl order
/// * `format` - The output shape to produce
///
/// # Returns
///
/// The projected output; record order is preserved in every shape
pub fn project(records: &[PageRecord], format: OutputFormat) -> Output {
    match format {
        OutputFormat::Structured => Output::Structured(records.to_vec()),
        OutputFormat::FlatText => Output::FlatText(flatten(records)),
        OutputFormat::Table => Output::Table(table_view(records)),
    }
}

/// Builds the structured payload view
///
/// `{"text": ...}` for the flat text format, `{"pages": [...]}` otherwise.
/// The table format falls under `pages` here; hosts wanting rows use
/// [`table_view`].
pub fn structured_view(records: &[PageRecord], format: OutputFormat) -> Value {
    match format {
        OutputFormat::FlatText => json!({ "text": flatten(records) }),
        OutputFormat::Structured | OutputFormat::Table => json!({ "pages": records }),
    }
}
