//! Checks applied to an input file before any extraction happens.

use crate::error::BalancoError;
use crate::layout::schema::{ColumnPair, TemplateLayout};
use std::path::Path;

/// Readers accept the `%PDF-` header anywhere in the first kilobyte.
const HEADER_WINDOW: usize = 1024;

/// Fiscal year of a statement: the last four characters of the file stem
/// ("balanco_2023.pdf" -> "2023").
pub fn fiscal_year(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let chars: Vec<char> = stem.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

/// Reject anything that is not a PDF.
pub fn ensure_pdf(file_name: &str, bytes: &[u8]) -> Result<(), BalancoError> {
    let window = &bytes[..bytes.len().min(HEADER_WINDOW)];
    if window.windows(5).any(|w| w == b"%PDF-") {
        Ok(())
    } else {
        Err(BalancoError::UnsupportedMediaType {
            file: file_name.to_string(),
        })
    }
}

/// Output columns for a file, chosen by its fiscal year.
pub fn resolve_columns<'a>(
    layout: &'a TemplateLayout,
    file_name: &str,
) -> Result<&'a ColumnPair, BalancoError> {
    let year = fiscal_year(file_name);
    layout
        .columns
        .get(&year)
        .ok_or_else(|| BalancoError::UnsupportedYear {
            year,
            file: file_name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin::{load_preset, DEFAULT_PRESET};

    #[test]
    fn test_fiscal_year_from_suffix() {
        assert_eq!(fiscal_year("balanco_2021.pdf"), "2021");
        assert_eq!(fiscal_year("/tmp/dre-acme-2024.PDF"), "2024");
        assert_eq!(fiscal_year("2023"), "2023");
        assert_eq!(fiscal_year("x.pdf"), "x");
    }

    #[test]
    fn test_ensure_pdf() {
        assert!(ensure_pdf("a.pdf", b"%PDF-1.7\n...").is_ok());
        assert!(ensure_pdf("a.pdf", b"\n\n%PDF-1.4").is_ok());
        assert!(matches!(
            ensure_pdf("a.xlsx", b"PK\x03\x04"),
            Err(BalancoError::UnsupportedMediaType { .. })
        ));
        assert!(ensure_pdf("vazio.pdf", b"").is_err());
    }

    #[test]
    fn test_resolve_columns() {
        let layout = load_preset(DEFAULT_PRESET).unwrap();
        let cols = resolve_columns(&layout, "balanco_2023.pdf").unwrap();
        assert_eq!(cols, &ColumnPair::new("D", "F"));
    }

    #[test]
    fn test_unsupported_year() {
        let layout = load_preset(DEFAULT_PRESET).unwrap();
        match resolve_columns(&layout, "balanco_2019.pdf") {
            Err(BalancoError::UnsupportedYear { year, file }) => {
                assert_eq!(year, "2019");
                assert_eq!(file, "balanco_2019.pdf");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
