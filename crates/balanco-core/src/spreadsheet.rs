//! Writing extracted figures into the template workbook and reading them back.

use crate::error::BalancoError;
use crate::model::{CellValue, CellWrite};
use calamine::{open_workbook, Reader, Xlsx};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{HorizontalAlignmentValues, VerticalAlignmentValues};

/// Number format applied to currency cells.
pub const CURRENCY_FORMAT: &str = r#""R$" #,##0.00"#;

/// Destination for cell writes.
pub trait CellWriter {
    fn write_cell(&mut self, write: &CellWrite) -> Result<(), BalancoError>;
}

/// An `.xlsx` file on disk.
///
/// Every write opens the file, changes one cell and saves the whole
/// workbook, so a failure leaves all earlier writes in place.
#[derive(Debug, Clone)]
pub struct XlsxWorkbook {
    path: PathBuf,
}

impl XlsxWorkbook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XlsxWorkbook { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CellWriter for XlsxWorkbook {
    fn write_cell(&mut self, write: &CellWrite) -> Result<(), BalancoError> {
        let context = format!("{} {}", write.sheet, write.coordinate);
        let io_err = |reason: String| BalancoError::SpreadsheetIo {
            context: context.clone(),
            reason,
        };

        let mut book = umya_spreadsheet::reader::xlsx::read(&self.path)
            .map_err(|e| io_err(format!("cannot open {}: {e}", self.path.display())))?;
        let sheet = book
            .get_sheet_by_name_mut(&write.sheet)
            .ok_or_else(|| io_err(format!("sheet '{}' not found", write.sheet)))?;
        let coordinate = write.coordinate.as_str();

        match &write.value {
            CellValue::Currency(_) => {
                let number = write
                    .value
                    .as_f64()
                    .ok_or_else(|| io_err(format!("amount {} is out of range", write.value)))?;
                sheet.get_cell_mut(coordinate).set_value_number(number);
                sheet
                    .get_style_mut(coordinate)
                    .get_number_format_mut()
                    .set_format_code(CURRENCY_FORMAT);
            }
            CellValue::Text(text) => {
                sheet.get_cell_mut(coordinate).set_value_string(text.clone());
                let alignment = sheet.get_style_mut(coordinate).get_alignment_mut();
                alignment.set_horizontal(HorizontalAlignmentValues::Center);
                alignment.set_vertical(VerticalAlignmentValues::Center);
            }
        }

        umya_spreadsheet::writer::xlsx::write(&book, &self.path)
            .map_err(|e| io_err(format!("cannot save {}: {e}", self.path.display())))?;
        Ok(())
    }
}

/// Collects writes in memory instead of touching a file.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    pub writes: Vec<CellWrite>,
}

impl CellWriter for MemoryWriter {
    fn write_cell(&mut self, write: &CellWrite) -> Result<(), BalancoError> {
        self.writes.push(write.clone());
        Ok(())
    }
}

/// Read a numeric cell, ignoring its display format.
///
/// Returns `Ok(None)` for an empty or non-numeric cell.
pub fn read_number(path: &Path, sheet: &str, coordinate: &str) -> Result<Option<f64>, BalancoError> {
    let context = format!("{sheet} {coordinate}");
    let (row, col) = parse_coordinate(coordinate).ok_or_else(|| BalancoError::SpreadsheetIo {
        context: context.clone(),
        reason: "invalid cell coordinate".into(),
    })?;

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| BalancoError::SpreadsheetIo {
        context: context.clone(),
        reason: format!("failed to open xlsx: {e}"),
    })?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| BalancoError::SpreadsheetIo {
            context: context.clone(),
            reason: format!("sheet '{sheet}' not found: {e}"),
        })?;

    Ok(cell_as_f64(range.get_value((row, col))))
}

/// Sheet names of a workbook, in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, BalancoError> {
    let workbook: Xlsx<_> = open_workbook(path).map_err(|e| BalancoError::SpreadsheetIo {
        context: path.display().to_string(),
        reason: format!("failed to open xlsx: {e}"),
    })?;
    Ok(workbook.sheet_names())
}

fn cell_as_f64(cell: Option<&calamine::Data>) -> Option<f64> {
    match cell? {
        calamine::Data::Float(f) => Some(*f),
        calamine::Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

/// Split an A1-style coordinate ("C7", "AA12") into zero-based (row, column).
pub fn parse_coordinate(coordinate: &str) -> Option<(u32, u32)> {
    let split = coordinate.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = coordinate.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        col = col.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }
    Some((row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn template(dir: &Path, sheets: &[&str]) -> PathBuf {
        let path = dir.join("modelo.xlsx");
        let mut book = umya_spreadsheet::new_file();
        for name in sheets {
            book.new_sheet(*name).expect("new sheet");
        }
        umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write template");
        path
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("A1"), Some((0, 0)));
        assert_eq!(parse_coordinate("C7"), Some((6, 2)));
        assert_eq!(parse_coordinate("AA12"), Some((11, 26)));
        assert_eq!(parse_coordinate("B0"), None);
        assert_eq!(parse_coordinate("7C"), None);
        assert_eq!(parse_coordinate("c7"), None);
        assert_eq!(parse_coordinate("C"), None);
        assert_eq!(parse_coordinate("C7X"), None);
    }

    #[test]
    fn test_memory_writer_records_in_order() {
        let mut writer = MemoryWriter::default();
        writer
            .write_cell(&CellWrite::currency("S", "B", 7, dec!(1)))
            .unwrap();
        writer
            .write_cell(&CellWrite::text("S", "B3", "ACME".into()))
            .unwrap();
        assert_eq!(writer.writes.len(), 2);
        assert_eq!(writer.writes[0].coordinate, "B7");
        assert!(!writer.writes[1].is_currency());
    }

    #[test]
    fn test_negative_amount_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = template(dir.path(), &["COMPARATIVO BALANÇO"]);

        let mut workbook = XlsxWorkbook::new(&path);
        workbook
            .write_cell(&CellWrite::currency(
                "COMPARATIVO BALANÇO",
                "C",
                21,
                dec!(-500.00),
            ))
            .unwrap();

        let value = read_number(&path, "COMPARATIVO BALANÇO", "C21").unwrap();
        assert_eq!(value, Some(-500.0));
    }

    #[test]
    fn test_text_cell_is_not_a_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = template(dir.path(), &["COMPARATIVO BALANÇO"]);

        let mut workbook = XlsxWorkbook::new(&path);
        workbook
            .write_cell(&CellWrite::text(
                "COMPARATIVO BALANÇO",
                "B3",
                "ACME LTDA".into(),
            ))
            .unwrap();

        assert_eq!(
            read_number(&path, "COMPARATIVO BALANÇO", "B3").unwrap(),
            None
        );
        assert!(sheet_names(&path)
            .unwrap()
            .contains(&"COMPARATIVO BALANÇO".to_string()));
    }

    #[test]
    fn test_missing_sheet_is_spreadsheet_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = template(dir.path(), &["OUTRA"]);

        let mut workbook = XlsxWorkbook::new(&path);
        let err = workbook
            .write_cell(&CellWrite::currency("DRE e CICLO", "D", 8, dec!(1)))
            .unwrap_err();
        match err {
            BalancoError::SpreadsheetIo { context, .. } => assert_eq!(context, "DRE e CICLO D8"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_spreadsheet_error() {
        let mut workbook = XlsxWorkbook::new("/nonexistent/modelo.xlsx");
        assert!(matches!(
            workbook.write_cell(&CellWrite::currency("S", "B", 7, dec!(1))),
            Err(BalancoError::SpreadsheetIo { .. })
        ));
    }
}
