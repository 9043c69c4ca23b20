use std::collections::BTreeSet;

use sdg9_gap::{default_selection, Comparison, DataSources, GapError, Metric, Session};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub session: Session,

    /// Every country present in any table, sorted.
    pub countries: Vec<String>,

    /// Countries the user is comparing.
    pub selection: BTreeSet<String>,

    pub metric: Metric,

    /// Text typed into the country search box.
    pub country_query: String,

    /// Result of the latest pass; `None` until the first one.
    pub outcome: Option<Result<Comparison, GapError>>,

    /// One colour per country.
    pub color_map: ColorMap,

    /// Blocking message when the tables could not be loaded.
    pub fatal_message: Option<String>,
}

impl AppState {
    /// Load the tables and run the first comparison with the seed selection.
    pub fn new(sources: DataSources) -> Self {
        let mut state = Self {
            session: Session::new(sources),
            countries: Vec::new(),
            selection: default_selection(),
            metric: Metric::default(),
            country_query: String::new(),
            outcome: None,
            color_map: ColorMap::default(),
            fatal_message: None,
        };

        match state.session.load().map(|catalog| catalog.countries()) {
            Ok(countries) => {
                state.countries = countries;
                state.color_map = ColorMap::new(&state.countries);
                state.recompute();
            }
            Err(e) => {
                let cause = std::error::Error::source(&e)
                    .map(|s| format!(": {s}"))
                    .unwrap_or_default();
                log::error!("Failed to load data: {e}{cause}");
                state.fatal_message = Some(format!("Error: {e}{cause}"));
            }
        }
        state
    }

    /// Rerun the comparison for the current metric and selection.
    pub fn recompute(&mut self) {
        if self.fatal_message.is_some() {
            return;
        }
        let outcome = self.session.compare(self.metric.key(), &self.selection);
        if let Err(e) = &outcome {
            if e.is_fatal() {
                self.fatal_message = Some(format!("Error: {e}"));
            } else {
                log::info!("{}: {e}", self.metric.key());
            }
        }
        self.outcome = Some(outcome);
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if self.metric != metric {
            self.metric = metric;
            self.recompute();
        }
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selection.remove(country) {
            self.selection.insert(country.to_string());
        }
        self.recompute();
    }

    /// Countries matching the search box, case-insensitively.
    pub fn visible_countries(&self) -> Vec<String> {
        let query = self.country_query.trim().to_lowercase();
        self.countries
            .iter()
            .filter(|c| query.is_empty() || c.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Select every known country.
    pub fn select_all(&mut self) {
        self.selection = self.countries.iter().cloned().collect();
        self.recompute();
    }

    /// Deselect all countries.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdg9_gap::SourceId;

    fn write_sources(dir: &std::path::Path) {
        let owid = "country,year,mfg_value_pct\nKenya,2022,7.1\nChile,2022,9.8\n";
        let sdr = "country,year,researchers_pm\nKenya,2022,95\n";
        let wb = "country,year,mobile_cov_pct\nPeru,2022,93\n";
        std::fs::write(dir.join(SourceId::OurWorldInData.file_name()), owid).unwrap();
        std::fs::write(dir.join(SourceId::SdrScores.file_name()), sdr).unwrap();
        std::fs::write(dir.join(SourceId::WorldBank.file_name()), wb).unwrap();
    }

    #[test]
    fn missing_data_blocks_the_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(DataSources::new(dir.path()));
        let msg = state.fatal_message.expect("fatal message");
        assert!(msg.contains("ourworldindata_sdg9.csv"));
        assert!(state.outcome.is_none());
    }

    #[test]
    fn selection_changes_recompute() {
        let dir = tempfile::TempDir::new().unwrap();
        write_sources(dir.path());
        let mut state = AppState::new(DataSources::new(dir.path()));
        assert_eq!(state.countries, ["Chile", "Kenya", "Peru"]);

        // Seed selection only matches Kenya.
        let summary = &state.outcome.as_ref().unwrap().as_ref().unwrap().summary;
        assert_eq!(summary.best_country, "Kenya");

        state.toggle_country("Chile");
        let summary = &state.outcome.as_ref().unwrap().as_ref().unwrap().summary;
        assert_eq!(summary.best_country, "Chile");
        assert_eq!(summary.worst_country, "Kenya");

        state.set_metric(Metric::MobileCoverage);
        assert!(matches!(state.outcome, Some(Err(GapError::EmptyResult { .. }))));

        state.select_none();
        state.set_metric(Metric::ManufacturingValueAdded);
        assert!(matches!(state.outcome, Some(Err(GapError::EmptyResult { .. }))));
        assert!(state.fatal_message.is_none());

        state.country_query = "pe".into();
        assert_eq!(state.visible_countries(), ["Peru"]);
    }
}
