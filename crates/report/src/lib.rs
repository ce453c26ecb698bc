pub mod artifact;
pub mod console;
pub mod ranking;
pub mod summary;

pub use artifact::{write_artifact, Artifact, TopTraderRow};
pub use console::render;
pub use ranking::{rank_strategies, rank_traders};
pub use summary::Summary;

use aggregate::{Aggregation, StrategyPerformance, TraderAggregate};

/// Ranked, read-only view over a finished aggregation.
#[derive(Debug)]
pub struct Report<'a> {
    pub summary: Summary,
    /// Every strategy, best ROI first.
    pub strategies: Vec<&'a StrategyPerformance>,
    /// Top traders by best ROI, already truncated.
    pub top_traders: Vec<(&'a str, &'a TraderAggregate)>,
}

impl<'a> Report<'a> {
    pub fn build(agg: &'a Aggregation, total_files: usize, trader_limit: usize) -> Self {
        Self {
            summary: Summary::compute(total_files, agg),
            strategies: rank_strategies(&agg.strategies),
            top_traders: rank_traders(&agg.traders, trader_limit),
        }
    }

    pub fn best_strategy(&self) -> Option<&'a StrategyPerformance> {
        self.strategies.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{StrategyParams, TraderRecord};

    #[test]
    fn best_strategy_is_first_ranked() {
        let mut agg = Aggregation::new();
        let rec = |roi| TraderRecord {
            address: Some("0x1".into()),
            roi: Some(roi),
            ..Default::default()
        };
        agg.fold(&StrategyParams::new(7, 1.0), &[rec(4.0)]);
        agg.fold(&StrategyParams::new(14, 1.0), &[rec(40.0)]);

        let report = Report::build(&agg, 2, 10);
        assert_eq!(report.best_strategy().unwrap().history_days, 14);
        assert_eq!(report.top_traders.len(), 1);
    }

    #[test]
    fn empty_aggregation_has_no_best_strategy() {
        let agg = Aggregation::new();
        let report = Report::build(&agg, 0, 10);
        assert!(report.best_strategy().is_none());
        assert!(report.top_traders.is_empty());
    }
}
