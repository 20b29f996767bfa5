pub mod extract;
pub mod fill;
pub mod layouts;
pub mod sections;

use balanco_core::error::BalancoError;
use balanco_core::extraction::pdftotext::PdftotextExtractor;
use balanco_core::extraction::Document;
use balanco_core::intake;
use std::path::Path;
use std::time::Duration;

/// File name used for year detection and messages.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a PDF, check its media type and extract its pages.
pub(crate) fn read_document(path: &Path, timeout: Duration) -> Result<Document, BalancoError> {
    let bytes = std::fs::read(path)?;
    intake::ensure_pdf(&display_name(path), &bytes)?;
    let extractor = PdftotextExtractor::with_timeout(timeout);
    Document::from_pdf(&bytes, &extractor)
}
