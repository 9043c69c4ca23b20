use std::fmt;

use serde::Serialize;

use crate::data::model::{IndicatorRow, IndicatorTable};
use crate::error::GapError;

// ---------------------------------------------------------------------------
// GapSummary – best vs. worst country in the latest year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapSummary {
    pub year: i32,
    pub best_country: String,
    pub best_value: f64,
    pub worst_country: String,
    pub worst_value: f64,
    /// `best_value - worst_value`, never negative.
    pub gap: f64,
}

impl fmt::Display for GapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: best {} ({:.1}), worst {} ({:.1}), gap {:.1}",
            self.year, self.best_country, self.best_value, self.worst_country, self.worst_value, self.gap
        )
    }
}

/// Summarise the latest year of a filtered view.
///
/// Only rows of the maximum year are compared. Among equal values the row
/// that comes first in `filtered` wins, both for best and for worst. Rows
/// without a value for `metric_key` take no part in the comparison.
pub fn analyze(filtered: &IndicatorTable, metric_key: &str) -> Result<GapSummary, GapError> {
    let year = filtered.latest_year().ok_or_else(|| GapError::EmptyResult {
        metric: metric_key.to_string(),
    })?;

    let mut best: Option<(&IndicatorRow, f64)> = None;
    let mut worst: Option<(&IndicatorRow, f64)> = None;

    for row in filtered.rows.iter().filter(|r| r.year == year) {
        let Some(value) = row.value(metric_key).filter(|v| !v.is_nan()) else {
            continue;
        };
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((row, value));
        }
        if worst.map_or(true, |(_, w)| value < w) {
            worst = Some((row, value));
        }
    }

    let (Some((best_row, best_value)), Some((worst_row, worst_value))) = (best, worst) else {
        return Err(GapError::NoLatestValues {
            metric: metric_key.to_string(),
            year,
        });
    };

    Ok(GapSummary {
        year,
        best_country: best_row.country.clone(),
        best_value,
        worst_country: worst_row.country.clone(),
        worst_value,
        gap: best_value - worst_value,
    })
}
