//! Flat text projection

use crate::crawler::PageRecord;

/// Flattens page records into a single newline-joined text blob
///
/// Per record, in order: a `Title:` line and a `Description:` line when
/// metadata was extracted, every heading (h1 through h6) on its own line, then
/// the paragraph block. JSON records contribute nothing.
pub fn flatten(records: &[PageRecord]) -> String {
    let mut lines = Vec::new();

    for record in records {
        if let Some(metadata) = record.metadata() {
            lines.push(format!("Title: {}", metadata.title));
            lines.push(format!("Description: {}", metadata.description));
        }

        if let Some(headings) = record.headings() {
            lines.extend(headings.iter().cloned());
        }

        if let Some(paragraphs) = record.paragraphs() {
            lines.push(paragraphs.to_string());
        }
    }

    lines.join("\n")
}
