//! Tabular projection

use crate::crawler::{Headings, Metadata, PageRecord};
use serde::Serialize;

/// One row of the table view
///
/// Images and links are never carried into rows, even when extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub url: String,
    pub metadata: Option<Metadata>,
    /// Empty when the record has no paragraph block
    pub paragraphs: String,
    pub headings: Option<Headings>,
}

impl From<&PageRecord> for TableRow {
    fn from(record: &PageRecord) -> Self {
        Self {
            url: record.url().to_string(),
            metadata: record.metadata().cloned(),
            paragraphs: record.paragraphs().unwrap_or_default().to_string(),
            headings: record.headings().cloned(),
        }
    }
}

/// Builds one row per record, preserving record order
pub fn table_view(records: &[PageRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from).collect()
}
