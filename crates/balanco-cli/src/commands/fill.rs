use balanco_core::error::BalancoError;
use balanco_core::extraction::pdftotext::PdftotextExtractor;
use balanco_core::intake;
use balanco_core::layout::builtin::{self, DEFAULT_PRESET};
use balanco_core::layout::schema::{ColumnPair, TemplateLayout};
use balanco_core::mapping::outcome::ProcessReport;
use balanco_core::spreadsheet::{sheet_names, XlsxWorkbook};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::display_name;
use crate::output;

pub struct FillArgs {
    pub pdf_files: Vec<PathBuf>,
    pub template: PathBuf,
    pub out: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub preset: Option<String>,
    pub output_format: String,
    pub timeout: Duration,
}

/// A PDF that passed intake, ready to be processed.
struct Input {
    name: String,
    bytes: Vec<u8>,
    columns: ColumnPair,
}

/// Outcome of one document of the batch.
pub struct DocumentReport {
    pub file: String,
    pub report: ProcessReport,
}

pub fn run(args: FillArgs) -> Result<(), BalancoError> {
    let layout = select_layout(args.layout.as_deref(), args.preset.as_deref())?;

    // Reject the whole batch before the workbook is touched
    let mut inputs = Vec::with_capacity(args.pdf_files.len());
    for path in &args.pdf_files {
        let name = display_name(path);
        let bytes = std::fs::read(path)?;
        intake::ensure_pdf(&name, &bytes)?;
        let columns = intake::resolve_columns(&layout, &name)?.clone();
        inputs.push(Input {
            name,
            bytes,
            columns,
        });
    }

    if !args.template.is_file() {
        return Err(BalancoError::SpreadsheetIo {
            context: args.template.display().to_string(),
            reason: "template workbook not found".into(),
        });
    }
    let sheets = sheet_names(&args.template)?;
    for needed in [&layout.balance_sheet.sheet, &layout.income_statement.sheet] {
        if !sheets.contains(needed) {
            return Err(BalancoError::SpreadsheetIo {
                context: args.template.display().to_string(),
                reason: format!("template has no sheet '{needed}'"),
            });
        }
    }
    if let Some(ref out) = args.out {
        if same_file(&args.template, out) {
            return Err(BalancoError::SpreadsheetIo {
                context: out.display().to_string(),
                reason: "--out is the template itself; omit --out to fill it in place".into(),
            });
        }
    }

    let extractor = PdftotextExtractor::with_timeout(args.timeout);
    if !extractor.is_available() {
        return Err(BalancoError::PdftotextNotFound);
    }

    let target = match args.out {
        Some(out) => {
            std::fs::copy(&args.template, &out)?;
            out
        }
        None => args.template,
    };
    let mut workbook = XlsxWorkbook::new(target);
    let mut reports = Vec::with_capacity(inputs.len());
    for input in &inputs {
        tracing::info!(file = %input.name, balance = %input.columns.balance, income = %input.columns.income, "processing");
        let report = balanco_core::process_pdf(
            &input.bytes,
            &extractor,
            &mut workbook,
            &layout,
            &input.columns,
        )?;
        reports.push(DocumentReport {
            file: input.name.clone(),
            report,
        });
    }

    match args.output_format.as_str() {
        "json" => output::json::print_fill(&reports)?,
        _ => output::table::print_fill(&reports, workbook.path()),
    }
    Ok(())
}

fn select_layout(file: Option<&Path>, preset: Option<&str>) -> Result<TemplateLayout, BalancoError> {
    match (file, preset) {
        (Some(path), _) => balanco_core::layout::load_layout(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::load_preset(DEFAULT_PRESET),
    }
}

/// Whether two paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
