use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metric – the four supported indicators
// ---------------------------------------------------------------------------

/// One of the tracked SDG 9 indicators. The variant order is the order shown
/// to the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Metric {
    #[default]
    ManufacturingValueAdded,
    ResearchExpenditure,
    ResearchersPerMillion,
    MobileCoverage,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::ManufacturingValueAdded,
        Metric::ResearchExpenditure,
        Metric::ResearchersPerMillion,
        Metric::MobileCoverage,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::ManufacturingValueAdded => "Manufacturing value added (% GDP)",
            Metric::ResearchExpenditure => "R&D expenditure (% GDP)",
            Metric::ResearchersPerMillion => "Researchers per million",
            Metric::MobileCoverage => "Mobile network coverage (%)",
        }
    }

    /// Column name in the source tables.
    pub fn key(self) -> &'static str {
        match self {
            Metric::ManufacturingValueAdded => "mfg_value_pct",
            Metric::ResearchExpenditure => "rd_expend_pct",
            Metric::ResearchersPerMillion => "researchers_pm",
            Metric::MobileCoverage => "mobile_cov_pct",
        }
    }

    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SourceId – which dataset a table came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceId {
    /// Our World in Data SDG 9 extract.
    OurWorldInData,
    /// Sustainable Development Report scores.
    SdrScores,
    /// World Bank SDG 9 extract.
    WorldBank,
}

impl SourceId {
    /// Resolution order: a metric is served by the first source in this
    /// list whose table has the column.
    pub const PRIORITY: [SourceId; 3] = [
        SourceId::OurWorldInData,
        SourceId::SdrScores,
        SourceId::WorldBank,
    ];

    /// File name without extension; the extension picks the reader.
    pub fn file_stem(self) -> &'static str {
        match self {
            SourceId::OurWorldInData => "ourworldindata_sdg9",
            SourceId::SdrScores => "sdr_scores",
            SourceId::WorldBank => "worldbank_sdg9",
        }
    }

    /// The CSV file name, used when no file of another format is present.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.file_stem())
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceId::OurWorldInData => "Our World in Data",
            SourceId::SdrScores => "Sustainable Development Report",
            SourceId::WorldBank => "World Bank",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// IndicatorRow – one (country, year) observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub country: String,
    pub year: i32,
    /// Indicator columns that hold a number in this row. Empty or
    /// non-numeric cells are absent.
    pub values: BTreeMap<String, f64>,
}

impl IndicatorRow {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

// ---------------------------------------------------------------------------
// IndicatorTable – a loaded dataset or a view derived from one
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    pub source: SourceId,
    /// Indicator column names in header order (excludes `country`, `year`).
    pub columns: Vec<String>,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn new(source: SourceId, columns: Vec<String>, rows: Vec<IndicatorRow>) -> Self {
        Self {
            source,
            columns,
            rows,
        }
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c == key)
    }

    /// A table of the same source and schema holding `rows`.
    pub fn with_rows(&self, rows: Vec<IndicatorRow>) -> Self {
        Self {
            source: self.source,
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn countries(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.country.as_str()).collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.rows.iter().map(|r| r.year).max()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_keys_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_key(metric.key()), Some(metric));
        }
        assert_eq!(Metric::from_key("literacy_rate"), None);
        assert_eq!(Metric::default(), Metric::ManufacturingValueAdded);
    }

    #[test]
    fn table_queries() {
        let table = IndicatorTable::new(
            SourceId::WorldBank,
            vec!["mobile_cov_pct".into()],
            vec![
                IndicatorRow::new("Kenya", 2020).with_value("mobile_cov_pct", 96.0),
                IndicatorRow::new("Kenya", 2021),
                IndicatorRow::new("Chile", 2019).with_value("mobile_cov_pct", 99.0),
            ],
        );
        assert!(table.has_column("mobile_cov_pct"));
        assert!(!table.has_column("country"));
        assert_eq!(table.latest_year(), Some(2021));
        assert_eq!(table.countries().into_iter().collect::<Vec<_>>(), ["Chile", "Kenya"]);
        assert_eq!(table.rows[1].value("mobile_cov_pct"), None);
    }
}
