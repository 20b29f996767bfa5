//! Locating the final (closing) balance of a labeled statement line.
//!
//! Two tiers, in a fixed order:
//!
//! 1. **Tables.** Every detected table on every page, in page order. The
//!    header row must contain a "Saldo Final" cell; the first data row with a
//!    cell equal to the label and a non-empty value in that column wins.
//! 2. **Text.** Only when no table matched anywhere. The normalized page text
//!    is searched for the label followed by two amounts on one line; the
//!    second amount is the closing balance (the first is the opening one).

use crate::error::BalancoError;
use crate::extraction::{PageContent, Table};
use crate::parsing::normalize::normalize_text;
use regex::Regex;

/// Normalized header text of the closing-balance column.
pub const FINAL_BALANCE_HEADER: &str = "saldo final";

const AMOUNT: &str = r"[.,()]*\d[\d.,()]*";

/// Where a value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Table,
    Text,
}

/// A located raw amount, before currency parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedValue {
    pub raw: String,
    pub page_number: usize,
    pub source: MatchSource,
}

/// Find the final balance for `label`, returning the raw amount text.
pub fn extract_final_balance(pages: &[PageContent], label: &str) -> Result<String, BalancoError> {
    locate_final_balance(pages, label).map(|v| v.raw)
}

/// Like [`extract_final_balance`], also reporting page and tier of the match.
pub fn locate_final_balance(
    pages: &[PageContent],
    label: &str,
) -> Result<LocatedValue, BalancoError> {
    let label_norm = normalize_text(label.trim());
    if label_norm.is_empty() {
        return Err(not_found(label));
    }

    for page in pages {
        for table in &page.tables {
            if let Some(raw) = find_in_table(table, &label_norm) {
                tracing::debug!(label, page = page.page_number, "final balance found in table");
                return Ok(LocatedValue {
                    raw,
                    page_number: page.page_number,
                    source: MatchSource::Table,
                });
            }
        }
    }

    let pattern = text_pattern(&label_norm)?;
    for page in pages {
        if let Some(raw) = find_in_text(&page.text, &pattern) {
            tracing::debug!(label, page = page.page_number, "final balance found in text");
            return Ok(LocatedValue {
                raw,
                page_number: page.page_number,
                source: MatchSource::Text,
            });
        }
    }

    Err(not_found(label))
}

fn find_in_table(table: &Table, label_norm: &str) -> Option<String> {
    let idx = table
        .header()?
        .iter()
        .position(|h| normalize_text(h.trim()) == FINAL_BALANCE_HEADER)?;

    table.data_rows().iter().find_map(|row| {
        let has_label = row
            .iter()
            .any(|cell| normalize_text(cell.trim()) == label_norm);
        if !has_label {
            return None;
        }
        // Empty or absent cell: keep scanning
        row.get(idx)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// Label, then two amount-like tokens.
///
/// A token is digits, `.`, `,` and parentheses with at least one digit, so
/// dot leaders ("ATIVO ......") are skipped. The two tokens must be separated
/// by a non-token character, so a single amount is never split in two, and
/// must sit on the same line: a row with one amount never borrows the next
/// row's.
fn text_pattern(label_norm: &str) -> Result<Regex, BalancoError> {
    let pattern = format!(
        r"(?i){}\D*?({AMOUNT})[^\d.,()\n]+?({AMOUNT})",
        regex::escape(label_norm)
    );
    Regex::new(&pattern).map_err(|e| {
        BalancoError::LayoutInvalid(format!("label '{label_norm}' cannot be searched: {e}"))
    })
}

fn find_in_text(text: &str, pattern: &Regex) -> Option<String> {
    let text_norm = normalize_text(text);
    let caps = pattern.captures(&text_norm)?;
    caps.get(2).map(|m| m.as_str().to_string())
}

fn not_found(label: &str) -> BalancoError {
    BalancoError::LabelNotFound {
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::pdftotext::page_from_layout;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn table_page(number: usize, rows: &[&[&str]]) -> PageContent {
        PageContent {
            page_number: number,
            text: String::new(),
            tables: vec![Table::new(rows.iter().map(|r| row(r)).collect())],
        }
    }

    fn text_page(number: usize, text: &str) -> PageContent {
        PageContent {
            page_number: number,
            text: text.to_string(),
            tables: vec![],
        }
    }

    #[test]
    fn test_table_returns_final_balance_column() {
        let pages = [table_page(
            1,
            &[
                &["Conta", "Saldo Inicial", "Saldo Final"],
                &["ATIVO", "100,00", "150,00"],
            ],
        )];
        assert_eq!(extract_final_balance(&pages, "ATIVO").unwrap(), "150,00");
    }

    #[test]
    fn test_text_returns_second_amount() {
        let pages = [text_page(1, "Ativo 100,00 150,00")];
        assert_eq!(extract_final_balance(&pages, "ATIVO").unwrap(), "150,00");
    }

    #[test]
    fn test_text_with_layout_padding_and_negative() {
        let pages = [text_page(
            1,
            "PATRIMÔNIO LÍQUIDO ........   (1.000,00)      (2.500,50)\n",
        )];
        assert_eq!(
            extract_final_balance(&pages, "PATRIMONIO LIQUIDO").unwrap(),
            "(2.500,50)"
        );
    }

    #[test]
    fn test_accent_insensitive_table_match() {
        let pages = [table_page(
            1,
            &[
                &["Código", "Descrição", "SALDO FINAL"],
                &["1.1.01", "Disponível", "12.345,67"],
            ],
        )];
        let located = locate_final_balance(&pages, "DISPONÍVEL").unwrap();
        assert_eq!(located.raw, "12.345,67");
        assert_eq!(located.source, MatchSource::Table);
    }

    #[test]
    fn test_empty_final_cell_keeps_searching() {
        let pages = [table_page(
            1,
            &[
                &["Conta", "Saldo Inicial", "Saldo Final"],
                &["ESTOQUES", "10,00", ""],
                &["ESTOQUES", "10,00", "20,00"],
            ],
        )];
        assert_eq!(extract_final_balance(&pages, "ESTOQUES").unwrap(), "20,00");
    }

    #[test]
    fn test_short_row_is_skipped() {
        let pages = [table_page(
            1,
            &[
                &["Conta", "Saldo Inicial", "Saldo Final"],
                &["ESTOQUES"],
            ],
        )];
        assert!(matches!(
            extract_final_balance(&pages, "ESTOQUES"),
            Err(BalancoError::LabelNotFound { .. })
        ));
    }

    #[test]
    fn test_table_without_final_header_ignored() {
        let pages = [table_page(
            1,
            &[&["Conta", "Valor"], &["ATIVO", "999,00"]],
        )];
        assert!(extract_final_balance(&pages, "ATIVO").is_err());
    }

    #[test]
    fn test_tables_on_later_pages_beat_text_on_earlier_pages() {
        let pages = [
            text_page(1, "ATIVO 1,00 2,00"),
            table_page(
                2,
                &[
                    &["Conta", "Saldo Inicial", "Saldo Final"],
                    &["ATIVO", "100,00", "150,00"],
                ],
            ),
        ];
        let located = locate_final_balance(&pages, "ATIVO").unwrap();
        assert_eq!(located.raw, "150,00");
        assert_eq!(located.page_number, 2);
    }

    #[test]
    fn test_first_table_match_across_pages_wins() {
        let header: &[&str] = &["Conta", "Saldo Inicial", "Saldo Final"];
        let pages = [
            table_page(1, &[header, &["PASSIVO", "1,00", "5,00"]]),
            table_page(2, &[header, &["PASSIVO", "1,00", "9,00"]]),
        ];
        assert_eq!(extract_final_balance(&pages, "PASSIVO").unwrap(), "5,00");
    }

    #[test]
    fn test_text_fallback_first_page_wins() {
        let pages = [
            text_page(1, "sem valores aqui"),
            text_page(2, "FORNECEDORES 3,00 4,00"),
            text_page(3, "FORNECEDORES 5,00 6,00"),
        ];
        let located = locate_final_balance(&pages, "Fornecedores").unwrap();
        assert_eq!(located.raw, "4,00");
        assert_eq!(located.page_number, 2);
        assert_eq!(located.source, MatchSource::Text);
    }

    #[test]
    fn test_label_with_regex_metacharacters() {
        let pages = [text_page(
            1,
            "LUCRO (PREJUIZO) LIQUIDO DO EXERCICIO 10,00 20,00",
        )];
        assert_eq!(
            extract_final_balance(&pages, "LUCRO (PREJUIZO) LIQUIDO DO EXERCICIO").unwrap(),
            "20,00"
        );
    }

    #[test]
    fn test_label_not_found() {
        let pages = [text_page(1, "ATIVO 100,00")];
        match extract_final_balance(&pages, "ESTOQUES") {
            Err(BalancoError::LabelNotFound { label }) => assert_eq!(label, "ESTOQUES"),
            other => panic!("unexpected {other:?}"),
        }
        // Only one amount after the label: no closing balance
        assert!(extract_final_balance(&pages, "ATIVO").is_err());
    }

    #[test]
    fn test_text_never_takes_amount_from_next_line() {
        let pages = [text_page(1, "ESTOQUES   75,00\nIMOBILIZADO   10,00   20,00")];
        assert!(matches!(
            extract_final_balance(&pages, "ESTOQUES"),
            Err(BalancoError::LabelNotFound { .. })
        ));
        assert_eq!(extract_final_balance(&pages, "IMOBILIZADO").unwrap(), "20,00");
    }

    #[test]
    fn test_layout_page_without_blank_line_above_header() {
        let text = "BALANÇO PATRIMONIAL\n\
                    Entidade: ACME LTDA      CNPJ: 00.000.000/0001-00\n\
                    Conta                 Saldo Inicial     Saldo Final\n\
                    ESTOQUES                                     75,00\n\
                    IMOBILIZADO                   10,00          20,00\n";
        let pages = [page_from_layout(1, text)];

        let located = locate_final_balance(&pages, "ESTOQUES").unwrap();
        assert_eq!(located.raw, "75,00");
        assert_eq!(located.source, MatchSource::Table);
        assert_eq!(extract_final_balance(&pages, "IMOBILIZADO").unwrap(), "20,00");
    }

    #[test]
    fn test_empty_label_never_matches() {
        let pages = [table_page(
            1,
            &[&["Conta", "Saldo Final"], &["", "1,00"]],
        )];
        assert!(extract_final_balance(&pages, "  ").is_err());
    }
}
