// ============================================================
// OUTLINE IMPORT SUMMARY
// ============================================================
// Result of mapping tokenized rows into outline pages

use serde::{Deserialize, Serialize};

use crate::domain::outline::OutlinePage;

/// Outline pages built from one delimited-text import, with counts
/// describing how the rows were used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineImport {
    /// Accepted pages, in row order
    pub pages: Vec<OutlinePage>,

    /// Rows produced by tokenization, header included
    pub row_count: usize,

    /// Whether the first row was recognised as a header and skipped
    pub header_detected: bool,

    /// Data rows dropped for being blank
    pub skipped_rows: usize,
}

impl OutlineImport {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn into_pages(self) -> Vec<OutlinePage> {
        self.pages
    }
}
