//! Document-level types.

use super::Page;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document metadata (title, author, etc.).
    pub metadata: Metadata,

    /// Pages in reading order.
    pub pages: Vec<Page>,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Get a page by number, reporting an out-of-range number as an error.
    pub fn page(&self, page_num: u32) -> Result<&Page> {
        self.get_page(page_num)
            .ok_or_else(|| Error::PageOutOfRange(page_num, self.page_count()))
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,

    /// Document author.
    pub author: Option<String>,

    /// Document subject.
    pub subject: Option<String>,

    /// Creator application.
    pub creator: Option<String>,

    /// PDF producer.
    pub producer: Option<String>,

    /// Creation date.
    pub created: Option<DateTime<Utc>>,

    /// Last modification date.
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7").
    pub pdf_version: String,

    /// Total number of pages.
    pub page_count: u32,

    /// Whether the document is encrypted.
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with a PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = SourceDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(1).is_none());
    }

    #[test]
    fn test_get_page() {
        let mut doc = SourceDocument::new();
        doc.add_page(Page::letter(1));
        doc.add_page(Page::letter(2));
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.get_page(2).unwrap().number, 2);
    }

    #[test]
    fn test_page_out_of_range() {
        let mut doc = SourceDocument::new();
        doc.add_page(Page::letter(1));
        assert_eq!(doc.page(1).unwrap().number, 1);
        assert!(matches!(doc.page(0), Err(Error::PageOutOfRange(0, 1))));
        assert!(matches!(doc.page(3), Err(Error::PageOutOfRange(3, 1))));
    }
}
