use serde::Serialize;

use aggregate::Aggregation;

/// Corpus-wide statistics for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_files: usize,
    pub total_strategies: usize,
    /// Sum of `tradersAnalyzed` over all strategies (not deduplicated).
    pub total_traders: usize,
    pub unique_traders: usize,
    #[serde(rename = "profitableTraders")]
    pub total_profitable: usize,
    /// Percent of `total_traders` with ROI > 0; `0` when there are none.
    pub profitable_rate: f64,
}

impl Summary {
    pub fn compute(total_files: usize, agg: &Aggregation) -> Self {
        let total_traders: usize = agg.strategies.iter().map(|s| s.traders_analyzed).sum();
        let total_profitable: usize = agg.strategies.iter().map(|s| s.profitable_traders).sum();
        let profitable_rate = if total_traders > 0 {
            total_profitable as f64 / total_traders as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_files,
            total_strategies: agg.strategies.len(),
            total_traders,
            unique_traders: agg.traders.len(),
            total_profitable,
            profitable_rate,
        }
    }
}
