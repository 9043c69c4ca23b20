//! Properties of resolve / filter / analyze over generated tables.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sdg9_gap::data::filter::filter_countries;
use sdg9_gap::data::resolver::resolve;
use sdg9_gap::{analyze, GapError, IndicatorRow, IndicatorTable, SourceId};

const KEYS: [&str; 5] = [
    "mfg_value_pct",
    "rd_expend_pct",
    "researchers_pm",
    "mobile_cov_pct",
    "literacy_rate",
];
const COUNTRIES: [&str; 5] = ["Kenya", "Chile", "Brazil", "Korea, Rep.", "Peru"];
const KEY: &str = "mfg_value_pct";

fn row_strategy() -> impl Strategy<Value = IndicatorRow> {
    (
        prop::sample::select(COUNTRIES.to_vec()),
        2018..2023i32,
        prop::option::weighted(0.9, -50.0..150.0f64),
    )
        .prop_map(|(country, year, value)| {
            let row = IndicatorRow::new(country, year);
            match value {
                Some(v) => row.with_value(KEY, v),
                None => row,
            }
        })
}

fn table_strategy() -> impl Strategy<Value = IndicatorTable> {
    prop::collection::vec(row_strategy(), 0..30)
        .prop_map(|rows| IndicatorTable::new(SourceId::OurWorldInData, vec![KEY.into()], rows))
}

fn schema_strategy() -> impl Strategy<Value = Vec<IndicatorTable>> {
    prop::collection::vec(prop::sample::subsequence(KEYS[..4].to_vec(), 0..=4), 3).prop_map(
        |schemas| {
            SourceId::PRIORITY
                .iter()
                .zip(schemas)
                .map(|(&source, cols)| {
                    IndicatorTable::new(source, cols.into_iter().map(String::from).collect(), vec![])
                })
                .collect()
        },
    )
}

fn selection_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::sample::subsequence(COUNTRIES.to_vec(), 0..=5)
        .prop_map(|c| c.into_iter().map(String::from).collect())
}

proptest! {
    #[test]
    fn resolve_finds_first_table_with_key(tables in schema_strategy(), key in prop::sample::select(KEYS.to_vec())) {
        match resolve(key, &tables) {
            Ok(table) => {
                prop_assert!(table.has_column(key));
                let first = tables.iter().position(|t| t.has_column(key));
                prop_assert_eq!(Some(table.source), first.map(|i| tables[i].source));
            }
            Err(GapError::Unresolved { .. }) => {
                prop_assert!(tables.iter().all(|t| !t.has_column(key)));
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn filter_keeps_selected_rows_in_order(table in table_strategy(), countries in selection_strategy()) {
        let expected: Vec<&IndicatorRow> = table
            .rows
            .iter()
            .filter(|r| countries.contains(&r.country))
            .collect();

        match filter_countries(&table, &countries, KEY) {
            Ok(filtered) => {
                prop_assert!(filtered.rows.iter().all(|r| countries.contains(&r.country)));
                prop_assert_eq!(filtered.rows.iter().collect::<Vec<_>>(), expected);
            }
            Err(GapError::EmptyResult { .. }) => prop_assert!(expected.is_empty()),
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn gap_is_non_negative_and_zero_iff_equal(table in table_strategy()) {
        let Ok(summary) = analyze(&table, KEY) else {
            return Ok(());
        };
        prop_assert!(summary.gap >= 0.0);

        let latest: Vec<f64> = table
            .rows
            .iter()
            .filter(|r| r.year == summary.year)
            .filter_map(|r| r.value(KEY))
            .collect();
        let all_equal = latest.iter().all(|&v| v == latest[0]);
        prop_assert_eq!(summary.gap == 0.0, all_equal);
        prop_assert!(latest.iter().all(|&v| v <= summary.best_value && v >= summary.worst_value));
    }

    #[test]
    fn pipeline_is_idempotent(table in table_strategy(), countries in selection_strategy()) {
        let tables = vec![table];
        let run = || {
            let resolved = resolve(KEY, &tables).ok()?;
            let filtered = filter_countries(resolved, &countries, KEY).ok()?;
            analyze(&filtered, KEY).ok()
        };
        let first = run();
        let second = run();
        prop_assert_eq!(
            first.as_ref().map(|s| (s.best_value.to_bits(), s.worst_value.to_bits(), s.gap.to_bits())),
            second.as_ref().map(|s| (s.best_value.to_bits(), s.worst_value.to_bits(), s.gap.to_bits()))
        );
        prop_assert_eq!(first, second);
    }
}
