use crate::error::BalancoError;
use crate::extraction::PageContent;
use regex::Regex;
use std::sync::LazyLock;

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Entidade:\s*(.+)").expect("valid entity pattern"));

/// Find the reporting entity's name ("Entidade: ACME LTDA").
///
/// Pages are searched in order and the first marker wins. The value runs to
/// the end of the line, truncated at the next wide whitespace gap so trailing
/// layout columns (e.g. "CNPJ: ...") are not captured.
pub fn extract_entity_name(pages: &[PageContent]) -> Result<String, BalancoError> {
    pages
        .iter()
        .find_map(|page| entity_from_text(&page.text))
        .ok_or(BalancoError::EntityNameNotFound)
}

fn entity_from_text(text: &str) -> Option<String> {
    let caps = ENTITY_RE.captures(text)?;
    let rest = caps.get(1)?.as_str().trim();
    // Truncate at next large whitespace gap (3+ spaces)
    let value = match rest.find("   ") {
        Some(gap_pos) => rest[..gap_pos].trim(),
        None => rest,
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: usize, text: &str) -> PageContent {
        PageContent {
            page_number: number,
            text: text.to_string(),
            tables: vec![],
        }
    }

    #[test]
    fn test_entity_basic() {
        let pages = [page(1, "BALANÇO PATRIMONIAL\nEntidade: Comércio Exemplo LTDA\nPeríodo: 2023")];
        assert_eq!(
            extract_entity_name(&pages).unwrap(),
            "Comércio Exemplo LTDA"
        );
    }

    #[test]
    fn test_entity_truncated_at_layout_gap() {
        let pages = [page(1, "Entidade: ACME S/A        CNPJ: 00.000.000/0001-00")];
        assert_eq!(extract_entity_name(&pages).unwrap(), "ACME S/A");
    }

    #[test]
    fn test_entity_on_later_page() {
        let pages = [page(1, "capa"), page(2, "Entidade:   Padaria Boa Vista ME")];
        assert_eq!(extract_entity_name(&pages).unwrap(), "Padaria Boa Vista ME");
    }

    #[test]
    fn test_entity_missing() {
        let pages = [page(1, "BALANÇO PATRIMONIAL")];
        assert!(matches!(
            extract_entity_name(&pages),
            Err(BalancoError::EntityNameNotFound)
        ));
    }
}
