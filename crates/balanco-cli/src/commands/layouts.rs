use balanco_core::error::BalancoError;
use balanco_core::layout::builtin;
use balanco_core::layout::schema::{SheetLayout, TemplateLayout};
use std::path::Path;

pub fn list() -> Result<(), BalancoError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        println!("  {:<16} {} (v{})", name, layout.name, layout.version);
        if let Some(ref desc) = layout.description {
            println!("  {:<16} {}", "", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), BalancoError> {
    let layout = builtin::load_preset(preset)?;

    println!("{} (version {})\n", layout.name, layout.version);
    if let Some(ref desc) = layout.description {
        println!("{}\n", desc);
    }

    print_sheet("Balance sheet", &layout.balance_sheet);
    print_sheet("Income statement", &layout.income_statement);

    println!("Columns per fiscal year:\n");
    println!("  {:<6}  {:<8}  Income", "Year", "Balance");
    println!("  {}", "-".repeat(24));
    for (year, pair) in &layout.columns {
        println!("  {:<6}  {:<8}  {}", year, pair.balance, pair.income);
    }
    println!();
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), BalancoError> {
    let layout = balanco_core::layout::load_layout(file)?;
    println!("Valid: {}", summary(&layout));
    Ok(())
}

fn print_sheet(title: &str, sheet: &SheetLayout) {
    println!("{title}: sheet \"{}\"", sheet.sheet);
    if let Some(ref cell) = sheet.entity_cell {
        println!("  entity name -> {cell}");
    }
    for spec in &sheet.rows {
        println!("  row {:>3}  {}", spec.row, spec.label);
    }
    println!();
}

fn summary(layout: &TemplateLayout) -> String {
    let years: Vec<&str> = layout.columns.keys().map(String::as_str).collect();
    format!(
        "{} (v{}), {} balance rows, {} income rows, years {}",
        layout.name,
        layout.version,
        layout.balance_sheet.rows.len(),
        layout.income_statement.rows.len(),
        years.join(", ")
    )
}
