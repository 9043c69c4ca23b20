use crate::data::model::Metric;

const BENCHMARK_LEADER: &str = "Countries with a large gap should benchmark the leading country's \
     model, e.g. its technology policy and R&D funding structure.";

const MOBILE_INFRASTRUCTURE: &str = "Countries lacking mobile coverage benefit most from expanded \
     public-private infrastructure investment and improved spectrum licensing.";

const INDUSTRIAL_BASE: &str = "Countries with a weak manufacturing base need industrial clusters, \
     broader SME support and programmes to join international supply chains.";

/// Improvement suggestions shown under the gap summary, the one closest to
/// `metric` first.
pub fn recommendations(metric: Metric) -> Vec<&'static str> {
    match metric {
        Metric::MobileCoverage => vec![MOBILE_INFRASTRUCTURE, BENCHMARK_LEADER, INDUSTRIAL_BASE],
        Metric::ManufacturingValueAdded => {
            vec![INDUSTRIAL_BASE, BENCHMARK_LEADER, MOBILE_INFRASTRUCTURE]
        }
        Metric::ResearchExpenditure | Metric::ResearchersPerMillion => {
            vec![BENCHMARK_LEADER, MOBILE_INFRASTRUCTURE, INDUSTRIAL_BASE]
        }
    }
}
