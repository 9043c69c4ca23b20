use std::collections::BTreeSet;

use super::model::IndicatorTable;
use crate::error::GapError;

/// Countries offered for selection: the sorted union over all tables.
pub fn country_universe(tables: &[IndicatorTable]) -> Vec<String> {
    tables
        .iter()
        .flat_map(|t| t.countries())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Keep the rows whose country is selected, in source order.
///
/// `metric_key` only labels the error when nothing matches: an empty
/// selection, or countries the table does not cover.
pub fn filter_countries(
    table: &IndicatorTable,
    countries: &BTreeSet<String>,
    metric_key: &str,
) -> Result<IndicatorTable, GapError> {
    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|row| countries.contains(&row.country))
        .cloned()
        .collect();

    if rows.is_empty() {
        return Err(GapError::EmptyResult {
            metric: metric_key.to_string(),
        });
    }
    Ok(table.with_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{IndicatorRow, SourceId};

    fn table() -> IndicatorTable {
        IndicatorTable::new(
            SourceId::OurWorldInData,
            vec!["mfg_value_pct".into()],
            vec![
                IndicatorRow::new("Kenya", 2021).with_value("mfg_value_pct", 7.3),
                IndicatorRow::new("Chile", 2021).with_value("mfg_value_pct", 9.8),
                IndicatorRow::new("Kenya", 2022).with_value("mfg_value_pct", 7.1),
                IndicatorRow::new("Korea, Rep.", 2022).with_value("mfg_value_pct", 28.4),
            ],
        )
    }

    fn set(countries: &[&str]) -> BTreeSet<String> {
        countries.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn keeps_selected_rows_in_source_order() {
        let filtered = filter_countries(&table(), &set(&["Korea, Rep.", "Kenya"]), "mfg_value_pct")
            .unwrap();
        let keys: Vec<(&str, i32)> = filtered
            .rows
            .iter()
            .map(|r| (r.country.as_str(), r.year))
            .collect();
        assert_eq!(keys, [("Kenya", 2021), ("Kenya", 2022), ("Korea, Rep.", 2022)]);
        assert_eq!(filtered.columns, ["mfg_value_pct"]);
        assert_eq!(filtered.source, SourceId::OurWorldInData);
    }

    #[test]
    fn no_match_is_empty_result() {
        let err = filter_countries(&table(), &set(&["France"]), "mfg_value_pct").unwrap_err();
        assert!(matches!(err, GapError::EmptyResult { .. }));

        let err = filter_countries(&table(), &BTreeSet::new(), "mfg_value_pct").unwrap_err();
        assert!(matches!(err, GapError::EmptyResult { .. }));
    }

    #[test]
    fn universe_is_sorted_union() {
        let other = IndicatorTable::new(
            SourceId::WorldBank,
            vec![],
            vec![IndicatorRow::new("Brazil", 2020), IndicatorRow::new("Kenya", 2020)],
        );
        assert_eq!(
            country_universe(&[table(), other]),
            ["Brazil", "Chile", "Kenya", "Korea, Rep."]
        );
    }
}
