use crate::extraction::PageContent;
use crate::model::SectionType;
use crate::parsing::normalize::normalize_phrase;
use std::collections::BTreeSet;

/// Canonical, normalized phrase that marks each section.
pub const SECTION_MARKERS: &[(SectionType, &str)] = &[
    (SectionType::BalanceSheet, "balanco patrimonial"),
    (SectionType::IncomeStatement, "demonstracao de resultado do exercicio"),
];

/// Detect which statement sections a document contains.
///
/// Each page's text is normalized and searched for the section markers. A
/// document may contain both sections, one, or none; none is not an error.
pub fn detect_sections(pages: &[PageContent]) -> BTreeSet<SectionType> {
    let mut found = BTreeSet::new();
    for page in pages {
        let text = normalize_phrase(&page.text);
        for (section, marker) in SECTION_MARKERS {
            if text.contains(marker) {
                found.insert(*section);
            }
        }
    }
    tracing::debug!(sections = ?found, "detected sections");
    found
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
    fn test_balance_sheet_detected() {
        let pages = [page(1, "BALANÇO PATRIMONIAL\nEntidade: ACME")];
        let sections = detect_sections(&pages);
        assert_eq!(sections.len(), 1);
        assert!(sections.contains(&SectionType::BalanceSheet));
    }

    #[test]
    fn test_both_sections_across_pages() {
        let pages = [
            page(1, "Balanço Patrimonial"),
            page(2, "DEMONSTRAÇÃO DE RESULTADO DO EXERCÍCIO"),
        ];
        let sections = detect_sections(&pages);
        assert!(sections.contains(&SectionType::BalanceSheet));
        assert!(sections.contains(&SectionType::IncomeStatement));
    }

    #[test]
    fn test_layout_spacing_tolerated() {
        let pages = [page(1, "   DEMONSTRAÇÃO   DE RESULTADO DO\n EXERCÍCIO")];
        assert!(detect_sections(&pages).contains(&SectionType::IncomeStatement));
    }

    #[test]
    fn test_unrecognized_document() {
        let pages = [page(1, "Relatório de vendas mensais")];
        assert!(detect_sections(&pages).is_empty());
    }
}
