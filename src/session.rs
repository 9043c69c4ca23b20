use std::collections::BTreeSet;

use crate::analysis::gap::{analyze, GapSummary};
use crate::config::DataSources;
use crate::data::filter::{country_universe, filter_countries};
use crate::data::loader::load_sources;
use crate::data::model::{IndicatorTable, Metric, SourceId};
use crate::data::schema::SchemaIndex;
use crate::error::{GapError, LoadError};

// ---------------------------------------------------------------------------
// Catalog – the three loaded tables plus their schema index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Catalog {
    /// Tables in [`SourceId::PRIORITY`] order.
    tables: Vec<IndicatorTable>,
    index: SchemaIndex,
}

impl Catalog {
    /// `tables` must be in priority order.
    pub fn new(tables: Vec<IndicatorTable>) -> Self {
        let index = SchemaIndex::build(&tables);
        Self { tables, index }
    }

    pub fn load(sources: &DataSources) -> Result<Self, LoadError> {
        Ok(Self::new(load_sources(sources)?))
    }

    pub fn tables(&self) -> &[IndicatorTable] {
        &self.tables
    }

    pub fn index(&self) -> &SchemaIndex {
        &self.index
    }

    pub fn table(&self, source: SourceId) -> Option<&IndicatorTable> {
        self.tables.iter().find(|t| t.source == source)
    }

    /// Look the metric up in the schema index instead of scanning columns.
    pub fn resolve(&self, metric_key: &str) -> Result<&IndicatorTable, GapError> {
        self.index
            .source_for(metric_key)
            .and_then(|source| self.table(source))
            .ok_or_else(|| GapError::Unresolved {
                metric: metric_key.to_string(),
            })
    }

    pub fn countries(&self) -> Vec<String> {
        country_universe(&self.tables)
    }
}

// ---------------------------------------------------------------------------
// Comparison – the result of one pass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub metric: String,
    pub source: SourceId,
    /// Resolved table narrowed to the selected countries.
    pub view: IndicatorTable,
    pub summary: GapSummary,
    /// Lower-priority sources that also carry the metric and were ignored.
    pub shadowed: Vec<SourceId>,
}

impl Comparison {
    /// Display label of the metric, or the raw column key for columns that
    /// are not one of the tracked indicators.
    pub fn metric_label(&self) -> &str {
        Metric::from_key(&self.metric).map_or(self.metric.as_str(), |m| m.label())
    }
}

// ---------------------------------------------------------------------------
// Session – load-once state for one user session
// ---------------------------------------------------------------------------

/// Holds the loaded tables for the lifetime of a session.
///
/// The first successful [`Session::load`] fills the cache; it is never
/// modified afterwards and is only dropped by [`Session::invalidate`] at
/// teardown. A failed load leaves the cache empty.
#[derive(Debug)]
pub struct Session {
    sources: DataSources,
    catalog: Option<Catalog>,
}

impl Session {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            catalog: None,
        }
    }

    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// The cached catalog, reading the sources only if nothing is cached yet.
    pub fn load(&mut self) -> Result<&Catalog, LoadError> {
        let catalog = match self.catalog.take() {
            Some(catalog) => catalog,
            None => Catalog::load(&self.sources)?,
        };
        Ok(self.catalog.insert(catalog))
    }

    pub fn invalidate(&mut self) {
        if self.catalog.take().is_some() {
            log::info!("Dropped cached tables from {}", self.sources.dir().display());
        }
    }

    /// One full pass: load if needed, resolve, filter, analyze.
    pub fn compare(
        &mut self,
        metric_key: &str,
        countries: &BTreeSet<String>,
    ) -> Result<Comparison, GapError> {
        let catalog = self.load()?;
        let table = catalog.resolve(metric_key)?;
        let view = filter_countries(table, countries, metric_key)?;
        let summary = analyze(&view, metric_key)?;
        let shadowed: Vec<SourceId> = catalog
            .index()
            .sources_with(metric_key)
            .into_iter()
            .filter(|&source| source != table.source)
            .collect();

        log::debug!(
            "{metric_key} from {}: {} rows for {} countries, {summary}",
            table.source,
            view.len(),
            countries.len()
        );

        Ok(Comparison {
            metric: metric_key.to_string(),
            source: table.source,
            view,
            summary,
            shadowed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::IndicatorRow;

    #[test]
    fn catalog_resolution_matches_ordered_scan() {
        let catalog = Catalog::new(vec![
            IndicatorTable::new(SourceId::OurWorldInData, vec!["rd_expend_pct".into()], vec![]),
            IndicatorTable::new(SourceId::SdrScores, vec!["rd_expend_pct".into()], vec![]),
            IndicatorTable::new(
                SourceId::WorldBank,
                vec!["mobile_cov_pct".into()],
                vec![IndicatorRow::new("Kenya", 2022)],
            ),
        ]);

        for key in ["rd_expend_pct", "mobile_cov_pct", "literacy_rate"] {
            let by_index = catalog.resolve(key).ok().map(|t| t.source);
            let by_scan = crate::data::resolver::resolve(key, catalog.tables())
                .ok()
                .map(|t| t.source);
            assert_eq!(by_index, by_scan, "{key}");
        }
        assert_eq!(catalog.countries(), ["Kenya"]);
    }

    #[test]
    fn comparison_labels_tracked_metrics() {
        let table = IndicatorTable::new(
            SourceId::SdrScores,
            vec!["sdg9_score".into(), "researchers_pm".into()],
            vec![IndicatorRow::new("Kenya", 2022)
                .with_value("sdg9_score", 40.0)
                .with_value("researchers_pm", 95.0)],
        );
        let summary = analyze(&table, "sdg9_score").unwrap();
        let mut comparison = Comparison {
            metric: "sdg9_score".into(),
            source: SourceId::SdrScores,
            view: table,
            summary,
            shadowed: Vec::new(),
        };
        assert_eq!(comparison.metric_label(), "sdg9_score");

        comparison.metric = Metric::ResearchersPerMillion.key().into();
        assert_eq!(comparison.metric_label(), "Researchers per million");
    }

    #[test]
    fn failed_load_caches_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(DataSources::new(dir.path()));

        assert!(session.load().is_err());
        assert!(!session.is_loaded());
        session.invalidate();
        assert!(!session.is_loaded());
    }
}
