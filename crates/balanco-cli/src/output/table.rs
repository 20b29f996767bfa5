use balanco_core::mapping::outcome::{FailureKind, ProcessReport};
use std::path::Path;

use crate::commands::fill::DocumentReport;

pub fn print_fill(reports: &[DocumentReport], workbook: &Path) {
    for (i, doc) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", doc.file);
        print_report(&doc.report);
    }

    let failures: usize = reports.iter().map(|d| d.report.failures.len()).sum();
    println!();
    if failures == 0 {
        println!("Workbook updated: {}", workbook.display());
    } else {
        println!(
            "Workbook updated with {} missing value(s): {}",
            failures,
            workbook.display()
        );
    }
}

fn print_report(report: &ProcessReport) {
    if report.unrecognized() {
        println!("  No balance sheet or income statement identified; nothing written.");
        return;
    }

    let sections: Vec<String> = report.sections.iter().map(|s| s.to_string()).collect();
    println!("  Sections: {}\n", sections.join(", "));

    if !report.written.is_empty() {
        let max_label = report
            .written
            .iter()
            .map(|w| w.label.chars().count())
            .max()
            .unwrap_or(10);

        for cell in &report.written {
            println!(
                "  {:<8} {:<width$}  {:<20} {:>6}  {}",
                cell.section.to_string(),
                cell.label,
                cell.sheet,
                cell.coordinate,
                cell.value,
                width = max_label
            );
        }
        println!();
    }

    if !report.failures.is_empty() {
        println!("  Not filled:");
        for failure in &report.failures {
            let what = match failure.kind {
                FailureKind::EntityNameNotFound => "entity name".to_string(),
                _ => failure.labels.join(" | "),
            };
            let row = failure
                .row
                .map(|r| format!(" (row {r})"))
                .unwrap_or_default();
            println!("    {} {}{}: {}", failure.section, what, row, failure.message);
        }
        println!();
    }
}
