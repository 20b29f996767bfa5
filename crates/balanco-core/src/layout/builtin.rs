use crate::error::BalancoError;
use crate::layout::schema::TemplateLayout;
use crate::layout::validate_layout;

const ANALISE_BALANCO_JSON: &str = include_str!("../../../../layouts/analise-balanco.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["analise-balanco"];

/// Layout used when none is given.
pub const DEFAULT_PRESET: &str = "analise-balanco";

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<TemplateLayout, BalancoError> {
    match name {
        "analise-balanco" => {
            let layout: TemplateLayout = serde_json::from_str(ANALISE_BALANCO_JSON)?;
            validate_layout(&layout)?;
            Ok(layout)
        }
        _ => Err(BalancoError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::schema::{ColumnPair, LabelSet};

    #[test]
    fn test_load_default_preset() {
        let layout = load_preset(DEFAULT_PRESET).unwrap();
        assert_eq!(layout.balance_sheet.sheet, "COMPARATIVO BALANÇO");
        assert_eq!(layout.income_statement.sheet, "DRE e CICLO");
        assert_eq!(layout.balance_sheet.entity_cell.as_deref(), Some("B3"));
        assert!(layout.income_statement.entity_cell.is_none());
    }

    #[test]
    fn test_balance_rows_7_to_21_in_order() {
        let layout = load_preset(DEFAULT_PRESET).unwrap();
        let rows: Vec<u32> = layout.balance_sheet.rows.iter().map(|r| r.row).collect();
        assert_eq!(rows, (7..=21).collect::<Vec<_>>());
        assert_eq!(
            layout.balance_sheet.rows[0].label,
            LabelSet::Single("ATIVO".into())
        );
    }

    #[test]
    fn test_income_synonyms_keep_declared_order() {
        let layout = load_preset(DEFAULT_PRESET).unwrap();
        let last = layout.income_statement.rows.last().unwrap();
        assert_eq!(last.row, 17);
        assert_eq!(
            last.label.candidates(),
            &["LUCRO (PREJUIZO) LIQUIDO DO EXERCICIO", "RESULTADO LIQUIDO"]
        );
        let rows: Vec<u32> = layout.income_statement.rows.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![8, 9, 10, 11, 14, 15, 17]);
    }

    #[test]
    fn test_year_columns() {
        let layout = load_preset(DEFAULT_PRESET).unwrap();
        assert_eq!(layout.columns.len(), 4);
        assert_eq!(layout.columns["2021"], ColumnPair::new("B", "B"));
        assert_eq!(layout.columns["2022"], ColumnPair::new("C", "D"));
        assert_eq!(layout.columns["2023"], ColumnPair::new("D", "F"));
        assert_eq!(layout.columns["2024"], ColumnPair::new("E", "H"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
