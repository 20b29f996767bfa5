use balanco_core::error::BalancoError;

use crate::commands::fill::DocumentReport;

pub fn print_fill(reports: &[DocumentReport]) -> Result<(), BalancoError> {
    let documents: Vec<serde_json::Value> = reports
        .iter()
        .map(|d| {
            serde_json::to_value(&d.report).map(|report| {
                serde_json::json!({
                    "file": d.file,
                    "report": report,
                })
            })
        })
        .collect::<Result<_, _>>()?;
    let json = serde_json::to_string_pretty(&documents)?;
    println!("{json}");
    Ok(())
}
