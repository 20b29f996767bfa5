pub mod outcome;

use crate::error::BalancoError;
use crate::extraction::PageContent;
use crate::layout::schema::{ColumnPair, LabelSpec, SheetLayout, TemplateLayout};
use crate::lookup::extract_final_balance;
use crate::model::{CellWrite, SectionType};
use crate::parsing::{extract_entity_name, parse_currency};
use crate::spreadsheet::CellWriter;
use outcome::{FailureKind, LabelFailure, ProcessReport, WrittenCell};

/// Fills one sheet of the template from a document's pages.
///
/// Rows are processed in declared order. A label that cannot be found or
/// parsed is recorded and skipped; only a spreadsheet failure stops the run.
pub struct SectionMapper<'a> {
    section: SectionType,
    sheet: &'a SheetLayout,
    column: &'a str,
}

impl<'a> SectionMapper<'a> {
    pub fn new(section: SectionType, layout: &'a TemplateLayout, columns: &'a ColumnPair) -> Self {
        SectionMapper {
            section,
            sheet: layout.sheet(section),
            column: columns.for_section(section),
        }
    }

    pub fn run(
        &self,
        pages: &[PageContent],
        writer: &mut dyn CellWriter,
        report: &mut ProcessReport,
    ) -> Result<(), BalancoError> {
        if let Some(ref entity_cell) = self.sheet.entity_cell {
            match extract_entity_name(pages) {
                Ok(name) => {
                    let write = CellWrite::text(&self.sheet.sheet, entity_cell, name.clone());
                    self.write(writer, &write, "Entidade")?;
                    tracing::info!(section = %self.section, cell = %entity_cell, "Entidade -> {name}");
                    report.written.push(WrittenCell {
                        section: self.section,
                        label: "Entidade".into(),
                        sheet: write.sheet,
                        coordinate: write.coordinate,
                        raw: name,
                        value: write.value,
                    });
                }
                Err(e @ BalancoError::EntityNameNotFound) => {
                    // Every supported statement carries the entity line; skip the sheet.
                    tracing::warn!(section = %self.section, "{e}");
                    report.failures.push(LabelFailure {
                        section: self.section,
                        labels: vec![],
                        row: None,
                        kind: FailureKind::EntityNameNotFound,
                        message: e.to_string(),
                    });
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }

        for spec in &self.sheet.rows {
            self.fill_row(pages, spec, writer, report)?;
        }
        Ok(())
    }

    fn fill_row(
        &self,
        pages: &[PageContent],
        spec: &LabelSpec,
        writer: &mut dyn CellWriter,
        report: &mut ProcessReport,
    ) -> Result<(), BalancoError> {
        let (label, raw) = match find_first(pages, spec) {
            Ok(found) => found,
            Err(e @ BalancoError::LabelNotFound { .. }) => {
                self.record_failure(report, spec, FailureKind::LabelNotFound, &e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let amount = match parse_currency(&raw) {
            Ok(amount) => amount,
            Err(e @ BalancoError::UnparseableAmount { .. }) => {
                self.record_failure(report, spec, FailureKind::UnparseableAmount, &e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let write = CellWrite::currency(&self.sheet.sheet, self.column, spec.row, amount);
        self.write(writer, &write, label)?;
        tracing::info!(section = %self.section, "'{label}' -> {} = {amount}", write.coordinate);

        report.written.push(WrittenCell {
            section: self.section,
            label: label.to_string(),
            sheet: write.sheet,
            coordinate: write.coordinate,
            raw,
            value: write.value,
        });
        Ok(())
    }

    fn write(
        &self,
        writer: &mut dyn CellWriter,
        write: &CellWrite,
        label: &str,
    ) -> Result<(), BalancoError> {
        writer.write_cell(write).map_err(|e| match e {
            BalancoError::SpreadsheetIo { context, reason } => BalancoError::SpreadsheetIo {
                context: format!("'{label}' -> {context}"),
                reason,
            },
            other => other,
        })
    }

    fn record_failure(
        &self,
        report: &mut ProcessReport,
        spec: &LabelSpec,
        kind: FailureKind,
        error: &BalancoError,
    ) {
        tracing::warn!(section = %self.section, row = spec.row, "error processing '{}': {error}", spec.label);
        report.failures.push(LabelFailure {
            section: self.section,
            labels: spec.label.candidates().to_vec(),
            row: Some(spec.row),
            kind,
            message: error.to_string(),
        });
    }
}

/// Try each synonym in declared order; the first one located wins.
fn find_first<'s>(
    pages: &[PageContent],
    spec: &'s LabelSpec,
) -> Result<(&'s str, String), BalancoError> {
    for label in spec.label.candidates() {
        match extract_final_balance(pages, label) {
            Ok(raw) => return Ok((label.as_str(), raw)),
            Err(BalancoError::LabelNotFound { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(BalancoError::LabelNotFound {
        label: spec.label.to_string(),
    })
}
