use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A financial statement section a document can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    BalanceSheet,
    IncomeStatement,
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionType::BalanceSheet => write!(f, "Balanço"),
            SectionType::IncomeStatement => write!(f, "DRE"),
        }
    }
}

/// Value written into a template cell. The variant decides the formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Numeric amount, formatted as `"R$" #,##0.00`.
    Currency(Decimal),
    /// Free text, unformatted and center-aligned.
    Text(String),
}

impl CellValue {
    /// Spreadsheet number for a currency value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Currency(d) => d.to_f64(),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Currency(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One cell write: sheet, coordinate such as "C7", and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellWrite {
    pub sheet: String,
    pub coordinate: String,
    pub value: CellValue,
}

impl CellWrite {
    pub fn currency(sheet: &str, column: &str, row: u32, amount: Decimal) -> Self {
        CellWrite {
            sheet: sheet.to_string(),
            coordinate: format!("{column}{row}"),
            value: CellValue::Currency(amount),
        }
    }

    pub fn text(sheet: &str, coordinate: &str, text: String) -> Self {
        CellWrite {
            sheet: sheet.to_string(),
            coordinate: coordinate.to_string(),
            value: CellValue::Text(text),
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self.value, CellValue::Currency(_))
    }
}
