use crate::model::{CellValue, SectionType};
use serde::{Deserialize, Serialize};

/// A value that made it into the workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenCell {
    pub section: SectionType,
    /// The label (or synonym) that was found.
    pub label: String,
    pub sheet: String,
    pub coordinate: String,
    /// Text as located in the PDF, before parsing.
    pub raw: String,
    pub value: CellValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    LabelNotFound,
    UnparseableAmount,
    EntityNameNotFound,
}

/// A line item (or the entity name) that could not be filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelFailure {
    pub section: SectionType,
    /// Labels that were tried, in order. Empty for the entity name.
    pub labels: Vec<String>,
    /// Target row, if the failure belongs to a label row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    pub kind: FailureKind,
    /// Human-readable reason.
    pub message: String,
}

/// Everything that happened while processing one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Sections detected in the document, balance sheet first.
    pub sections: Vec<SectionType>,
    pub written: Vec<WrittenCell>,
    pub failures: Vec<LabelFailure>,
}

impl ProcessReport {
    pub fn new(sections: Vec<SectionType>) -> Self {
        ProcessReport {
            sections,
            ..Default::default()
        }
    }

    /// True when neither statement section was found in the document.
    pub fn unrecognized(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Success, or the list of per-label failures.
    pub fn into_result(self) -> Result<(), Vec<LabelFailure>> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(self.failures)
        }
    }
}
