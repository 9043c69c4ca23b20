//! Error types for loading indicator tables and running a comparison.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring the three indicator tables into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required table is missing or could not be read.
    #[error("data source not found or unreadable: {}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::SourceNotFound { path, .. } => path,
        }
    }
}

/// Outcome of one comparison pass that produced no summary.
#[derive(Debug, Error)]
pub enum GapError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The metric is a column of none of the loaded tables.
    #[error("no loaded table provides metric '{metric}'")]
    Unresolved { metric: String },

    /// None of the selected countries has a row in the resolved table.
    #[error("no rows for the selected countries (metric '{metric}')")]
    EmptyResult { metric: String },

    /// The latest year is present but none of its rows carries a value.
    #[error("no '{metric}' values for the latest year {year}")]
    NoLatestValues { metric: String, year: i32 },
}

impl GapError {
    /// Load failures end the session; the rest depend only on the current
    /// metric and selection.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GapError::Load(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_load_errors_are_fatal() {
        let load = GapError::from(LoadError::SourceNotFound {
            path: PathBuf::from("data/sdr_scores.csv"),
            source: anyhow::anyhow!("No such file"),
        });
        assert!(load.is_fatal());
        assert!(load.to_string().contains("data/sdr_scores.csv"));

        let unresolved = GapError::Unresolved {
            metric: "literacy_rate".into(),
        };
        assert!(!unresolved.is_fatal());
        assert!(unresolved.to_string().contains("literacy_rate"));
    }
}
