pub mod pdftotext;
pub mod table;

use crate::error::BalancoError;
use serde::{Deserialize, Serialize};

/// A table grid detected on a page. The first row is the header.
///
/// Absent cells are empty strings, so every row of a table has the same
/// number of cells as its header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    /// Plain text of the page, lines separated by `\n`.
    pub text: String,
    pub tables: Vec<Table>,
}

/// One PDF, read once into its page sequence.
#[derive(Debug, Clone)]
pub struct Document {
    pub pages: Vec<PageContent>,
}

impl Document {
    pub fn from_pdf(pdf_bytes: &[u8], extractor: &dyn PdfExtractor) -> Result<Self, BalancoError> {
        let pages = extractor.extract_pages(pdf_bytes)?;
        tracing::debug!(
            backend = extractor.backend_name(),
            pages = pages.len(),
            "extracted PDF pages"
        );
        Ok(Document { pages })
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, BalancoError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
