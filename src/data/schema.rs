use std::collections::{BTreeMap, BTreeSet};

use super::model::{IndicatorTable, SourceId};

// ---------------------------------------------------------------------------
// TableSchema – the column set of one loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub source: SourceId,
    pub columns: BTreeSet<String>,
}

impl TableSchema {
    pub fn of(table: &IndicatorTable) -> Self {
        Self {
            source: table.source,
            columns: table.columns.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.columns.contains(key)
    }
}

// ---------------------------------------------------------------------------
// SchemaIndex – metric key → serving source
// ---------------------------------------------------------------------------

/// Static lookup from every indicator column to the table that serves it.
///
/// Built once from tables given in priority order; a key carried by several
/// tables maps to the first of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    schemas: Vec<TableSchema>,
    by_key: BTreeMap<String, SourceId>,
}

impl SchemaIndex {
    pub fn build(ordered: &[IndicatorTable]) -> Self {
        let schemas: Vec<TableSchema> = ordered.iter().map(TableSchema::of).collect();
        let mut by_key: BTreeMap<String, SourceId> = BTreeMap::new();

        for schema in &schemas {
            for key in &schema.columns {
                match by_key.get(key) {
                    Some(winner) => log::warn!(
                        "column '{key}' is present in both {winner} and {}; using {winner}",
                        schema.source
                    ),
                    None => {
                        by_key.insert(key.clone(), schema.source);
                    }
                }
            }
        }

        Self { schemas, by_key }
    }

    pub fn source_for(&self, key: &str) -> Option<SourceId> {
        self.by_key.get(key).copied()
    }

    /// Sources whose table has `key`, in priority order.
    pub fn sources_with(&self, key: &str) -> Vec<SourceId> {
        self.schemas
            .iter()
            .filter(|s| s.contains(key))
            .map(|s| s.source)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(source: SourceId, columns: &[&str]) -> IndicatorTable {
        IndicatorTable::new(
            source,
            columns.iter().map(|c| c.to_string()).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn first_table_wins_for_shared_keys() {
        let tables = vec![
            table(SourceId::OurWorldInData, &["mfg_value_pct"]),
            table(SourceId::SdrScores, &["researchers_pm", "rd_expend_pct"]),
            table(SourceId::WorldBank, &["mobile_cov_pct", "mfg_value_pct"]),
        ];
        let index = SchemaIndex::build(&tables);

        assert_eq!(index.source_for("mfg_value_pct"), Some(SourceId::OurWorldInData));
        assert_eq!(index.source_for("mobile_cov_pct"), Some(SourceId::WorldBank));
        assert_eq!(index.source_for("literacy_rate"), None);
        assert_eq!(
            index.sources_with("mfg_value_pct"),
            [SourceId::OurWorldInData, SourceId::WorldBank]
        );
        assert!(index.sources_with("literacy_rate").is_empty());
    }
}
