use super::model::IndicatorTable;
use crate::error::GapError;

/// Return the first table, in the given order, whose columns include
/// `metric_key`.
///
/// `tables` must already be in [`SourceId::PRIORITY`](super::model::SourceId::PRIORITY)
/// order; that order is the whole tie-break policy for keys carried by more
/// than one table.
pub fn resolve<'a>(
    metric_key: &str,
    tables: &'a [IndicatorTable],
) -> Result<&'a IndicatorTable, GapError> {
    tables
        .iter()
        .find(|t| t.has_column(metric_key))
        .ok_or_else(|| GapError::Unresolved {
            metric: metric_key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SourceId;

    fn tables() -> Vec<IndicatorTable> {
        vec![
            IndicatorTable::new(SourceId::OurWorldInData, vec!["mfg_value_pct".into()], vec![]),
            IndicatorTable::new(SourceId::SdrScores, vec!["researchers_pm".into()], vec![]),
            IndicatorTable::new(
                SourceId::WorldBank,
                vec!["mobile_cov_pct".into(), "mfg_value_pct".into()],
                vec![],
            ),
        ]
    }

    #[test]
    fn resolves_in_priority_order() {
        let tables = tables();
        assert_eq!(resolve("mfg_value_pct", &tables).unwrap().source, SourceId::OurWorldInData);
        assert_eq!(resolve("researchers_pm", &tables).unwrap().source, SourceId::SdrScores);
        assert_eq!(resolve("mobile_cov_pct", &tables).unwrap().source, SourceId::WorldBank);
    }

    #[test]
    fn unknown_key_is_unresolved() {
        let err = resolve("literacy_rate", &tables()).unwrap_err();
        assert!(matches!(err, GapError::Unresolved { ref metric } if metric == "literacy_rate"));
    }

    #[test]
    fn key_columns_are_not_metrics() {
        assert!(resolve("country", &tables()).is_err());
        assert!(resolve("year", &tables()).is_err());
    }
}
