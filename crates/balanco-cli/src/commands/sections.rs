use balanco_core::classify::detect_sections;
use balanco_core::error::BalancoError;
use std::path::PathBuf;
use std::time::Duration;

use super::{display_name, read_document};

pub fn run(pdf_file: PathBuf, timeout: Duration) -> Result<(), BalancoError> {
    let document = read_document(&pdf_file, timeout)?;
    let sections = detect_sections(&document.pages);

    println!("{} ({} page(s))", display_name(&pdf_file), document.pages.len());
    if sections.is_empty() {
        println!("  no balance sheet or income statement identified");
    }
    for section in sections {
        println!("  {section}");
    }
    Ok(())
}
