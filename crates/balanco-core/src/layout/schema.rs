use crate::model::SectionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where every extracted figure goes in the output workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateLayout {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub balance_sheet: SheetLayout,
    pub income_statement: SheetLayout,
    /// Fiscal year (as it appears at the end of a file name) -> columns.
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnPair>,
}

impl TemplateLayout {
    pub fn sheet(&self, section: SectionType) -> &SheetLayout {
        match section {
            SectionType::BalanceSheet => &self.balance_sheet,
            SectionType::IncomeStatement => &self.income_statement,
        }
    }
}

/// One sheet of the template and its label rows, in the order they are tried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet: String,
    /// Cell receiving the entity name ("Entidade:"), if this sheet has one.
    #[serde(default)]
    pub entity_cell: Option<String>,
    pub rows: Vec<LabelSpec>,
}

/// A label (or synonyms) and the row its final balance is written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSpec {
    pub label: LabelSet,
    pub row: u32,
}

/// Either one label or an ordered synonym list; the first one found wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSet {
    Single(String),
    Synonyms(Vec<String>),
}

impl LabelSet {
    /// Labels in the order they must be tried.
    pub fn candidates(&self) -> &[String] {
        match self {
            LabelSet::Single(label) => std::slice::from_ref(label),
            LabelSet::Synonyms(labels) => labels,
        }
    }

    pub fn primary(&self) -> &str {
        self.candidates().first().map(String::as_str).unwrap_or("")
    }
}

impl std::fmt::Display for LabelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.candidates().join(" | "))
    }
}

/// Output column letters for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPair {
    pub balance: String,
    pub income: String,
}

impl ColumnPair {
    pub fn new(balance: &str, income: &str) -> Self {
        ColumnPair {
            balance: balance.to_string(),
            income: income.to_string(),
        }
    }

    pub fn for_section(&self, section: SectionType) -> &str {
        match section {
            SectionType::BalanceSheet => &self.balance,
            SectionType::IncomeStatement => &self.income,
        }
    }
}
