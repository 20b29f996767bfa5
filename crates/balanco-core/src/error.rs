use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BalancoError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("pdftotext did not finish within {secs}s")]
    ExtractionTimeout { secs: u64 },

    #[error("{file} is not a PDF")]
    UnsupportedMediaType { file: String },

    #[error("year '{year}' is not supported in {file}")]
    UnsupportedYear { year: String, file: String },

    #[error("could not find '{label}' with a final balance in the PDF")]
    LabelNotFound { label: String },

    #[error("could not convert '{raw}' into a number")]
    UnparseableAmount { raw: String },

    #[error("could not find 'Entidade:' in the PDF")]
    EntityNameNotFound,

    #[error("spreadsheet write failed ({context}): {reason}")]
    SpreadsheetIo { context: String, reason: String },

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
