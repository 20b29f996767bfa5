pub mod classify;
pub mod error;
pub mod extraction;
pub mod intake;
pub mod layout;
pub mod lookup;
pub mod mapping;
pub mod model;
pub mod parsing;
pub mod spreadsheet;

use error::BalancoError;
use extraction::{Document, PdfExtractor};
use layout::schema::{ColumnPair, TemplateLayout};
use mapping::outcome::ProcessReport;
use mapping::SectionMapper;
use spreadsheet::CellWriter;

/// Main API entry point: fill the template from one PDF statement.
///
/// The document is classified first. The balance sheet mapper runs when a
/// balance sheet is present and the income statement mapper when an income
/// statement is present; a document may trigger both. A document with
/// neither section yields an empty, unrecognized report.
///
/// Per-label problems are collected in the report. Extraction and
/// spreadsheet failures abort the document and are returned as errors.
pub fn process_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    writer: &mut dyn CellWriter,
    layout: &TemplateLayout,
    columns: &ColumnPair,
) -> Result<ProcessReport, BalancoError> {
    let document = Document::from_pdf(pdf_bytes, extractor)?;
    process_document(&document, writer, layout, columns)
}

/// Same as [`process_pdf`] for a document whose pages are already extracted.
pub fn process_document(
    document: &Document,
    writer: &mut dyn CellWriter,
    layout: &TemplateLayout,
    columns: &ColumnPair,
) -> Result<ProcessReport, BalancoError> {
    let sections = classify::detect_sections(&document.pages);
    let mut report = ProcessReport::new(sections.iter().copied().collect());

    if sections.is_empty() {
        tracing::warn!("no balance sheet or income statement section identified in PDF");
        return Ok(report);
    }

    // BTreeSet order: balance sheet before income statement
    for section in sections {
        SectionMapper::new(section, layout, columns).run(&document.pages, writer, &mut report)?;
    }

    tracing::info!(
        written = report.written.len(),
        failures = report.failures.len(),
        "document processed"
    );
    Ok(report)
}
