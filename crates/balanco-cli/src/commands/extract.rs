use balanco_core::error::BalancoError;
use balanco_core::lookup::{locate_final_balance, MatchSource};
use balanco_core::parsing::parse_currency;
use std::path::PathBuf;
use std::time::Duration;

use super::read_document;

pub fn run(pdf_file: PathBuf, label: &str, timeout: Duration) -> Result<(), BalancoError> {
    let document = read_document(&pdf_file, timeout)?;
    let located = locate_final_balance(&document.pages, label)?;

    let source = match located.source {
        MatchSource::Table => "table",
        MatchSource::Text => "text",
    };
    println!("{label}");
    println!("  raw:    {}", located.raw);
    println!("  found:  page {} ({source})", located.page_number);
    match parse_currency(&located.raw) {
        Ok(amount) => println!("  amount: {amount}"),
        Err(e) => println!("  amount: {e}"),
    }
    Ok(())
}
