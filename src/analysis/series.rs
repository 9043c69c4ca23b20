use crate::data::model::IndicatorTable;

/// One country's line in the indicator chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySeries {
    pub country: String,
    /// `(year, value)` sorted by year.
    pub points: Vec<(i32, f64)>,
}

/// Split a filtered view into per-country series, countries in order of
/// first appearance. Rows without a value for `metric_key` are left out.
pub fn series_by_country(filtered: &IndicatorTable, metric_key: &str) -> Vec<CountrySeries> {
    let mut series: Vec<CountrySeries> = Vec::new();

    for row in &filtered.rows {
        let Some(value) = row.value(metric_key) else {
            continue;
        };
        match series.iter_mut().find(|s| s.country == row.country) {
            Some(s) => s.points.push((row.year, value)),
            None => series.push(CountrySeries {
                country: row.country.clone(),
                points: vec![(row.year, value)],
            }),
        }
    }

    for s in &mut series {
        s.points.sort_by_key(|&(year, _)| year);
    }
    series
}
