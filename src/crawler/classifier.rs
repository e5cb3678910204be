//! JSON/HTML classification of fetched responses

use crate::config::ContentTypePreference;

/// How a response body will be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Html,
}

/// Classifies a response from its declared Content-Type
///
/// | Preference | Content-Type contains `application/json` | Result |
/// |------------|------------------------------------------|--------|
/// | `json`     | any                                      | JSON   |
/// | `auto`     | yes                                      | JSON   |
/// | `auto`     | no                                       | HTML   |
/// | `html`     | any                                      | HTML   |
///
/// A JSON classification is final: a body that then fails to parse as JSON
/// is skipped, never re-tried as HTML.
pub fn classify(content_type: &str, preference: ContentTypePreference) -> ContentKind {
    match preference {
        ContentTypePreference::Json => ContentKind::Json,
        ContentTypePreference::Auto if content_type.contains("application/json") => {
            ContentKind::Json
        }
        ContentTypePreference::Auto | ContentTypePreference::Html => ContentKind::Html,
    }
}
