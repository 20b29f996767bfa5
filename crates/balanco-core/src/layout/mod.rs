pub mod builtin;
pub mod schema;

use crate::error::BalancoError;
use crate::spreadsheet::parse_coordinate;
use schema::{SheetLayout, TemplateLayout};
use std::collections::BTreeSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<TemplateLayout, BalancoError> {
    let content = std::fs::read_to_string(path).map_err(|e| BalancoError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<TemplateLayout, BalancoError> {
    let layout: TemplateLayout =
        serde_json::from_str(json).map_err(|e| BalancoError::LayoutLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<TemplateLayout, BalancoError> {
    let layout: TemplateLayout = serde_json::from_str(json).map_err(BalancoError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &TemplateLayout) -> Result<(), BalancoError> {
    validate_sheet(&layout.balance_sheet, "balance_sheet")?;
    validate_sheet(&layout.income_statement, "income_statement")?;

    for (year, columns) in &layout.columns {
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(BalancoError::LayoutInvalid(format!(
                "year key '{}' must be four digits",
                year
            )));
        }
        for column in [&columns.balance, &columns.income] {
            if !is_column(column) {
                return Err(BalancoError::LayoutInvalid(format!(
                    "year {} has invalid column '{}' (expected letters such as 'B' or 'AA')",
                    year, column
                )));
            }
        }
    }

    Ok(())
}

fn validate_sheet(sheet: &SheetLayout, field: &str) -> Result<(), BalancoError> {
    if sheet.sheet.trim().is_empty() {
        return Err(BalancoError::LayoutInvalid(format!(
            "{field}: sheet name must not be empty"
        )));
    }

    if let Some(ref cell) = sheet.entity_cell {
        if parse_coordinate(cell).is_none() {
            return Err(BalancoError::LayoutInvalid(format!(
                "{field}: invalid entity cell '{cell}'"
            )));
        }
    }

    if sheet.rows.is_empty() {
        return Err(BalancoError::LayoutInvalid(format!(
            "{field}: rows must not be empty"
        )));
    }

    let mut seen = BTreeSet::new();
    for spec in &sheet.rows {
        if spec.row == 0 {
            return Err(BalancoError::LayoutInvalid(format!(
                "{field}: row numbers start at 1 (label '{}')",
                spec.label
            )));
        }
        if !seen.insert(spec.row) {
            return Err(BalancoError::LayoutInvalid(format!(
                "{field}: row {} is mapped more than once",
                spec.row
            )));
        }
        let candidates = spec.label.candidates();
        if candidates.is_empty() || candidates.iter().any(|l| l.trim().is_empty()) {
            return Err(BalancoError::LayoutInvalid(format!(
                "{field}: row {} has an empty label",
                spec.row
            )));
        }
    }

    Ok(())
}

fn is_column(s: &str) -> bool {
    !s.is_empty() && s.len() <= 3 && s.chars().all(|c| c.is_ascii_uppercase())
}
