//! Page records produced by a crawl

use serde::Serialize;

/// Title and meta description of an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

/// Heading texts per level, each in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Returns the list for a heading level (1..=6)
    pub fn level(&self, level: u8) -> Option<&[String]> {
        match level {
            1 => Some(&self.h1),
            2 => Some(&self.h2),
            3 => Some(&self.h3),
            4 => Some(&self.h4),
            5 => Some(&self.h5),
            6 => Some(&self.h6),
            _ => None,
        }
    }

    pub(crate) fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }

    /// Iterates every heading text, h1 first through h6
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.h1
            .iter()
            .chain(&self.h2)
            .chain(&self.h3)
            .chain(&self.h4)
            .chain(&self.h5)
            .chain(&self.h6)
    }
}

/// Extraction result for an HTML page
///
/// Each optional field is present only when its extraction feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlPage {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<Headings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

/// A JSON response passed through unchanged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonPage {
    pub url: String,
    pub json: serde_json::Value,
}

/// One crawled page
///
/// Serializes untagged, so a JSON page is `{"url", "json"}` and an HTML page
/// carries only the fields that were extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageRecord {
    Json(JsonPage),
    Html(HtmlPage),
}

impl PageRecord {
    pub fn url(&self) -> &str {
        match self {
            Self::Json(page) => &page.url,
            Self::Html(page) => &page.url,
        }
    }

    pub fn as_html(&self) -> Option<&HtmlPage> {
        match self {
            Self::Html(page) => Some(page),
            Self::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonPage> {
        match self {
            Self::Json(page) => Some(page),
            Self::Html(_) => None,
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.as_html().and_then(|p| p.metadata.as_ref())
    }

    pub fn headings(&self) -> Option<&Headings> {
        self.as_html().and_then(|p| p.headings.as_ref())
    }

    pub fn paragraphs(&self) -> Option<&str> {
        self.as_html().and_then(|p| p.paragraphs.as_deref())
    }
}
