pub mod strategy;
pub mod traders;

pub use strategy::{StrategyAggregator, StrategyPerformance};
pub use traders::{TraderAggregate, TraderTracker};

use common::{StrategyParams, TraderRecord};

/// Both accumulators, folded together one file at a time.
///
/// Lives for one run. Order matters: per-strategy averages reflect only the
/// last file folded for that strategy.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub strategies: StrategyAggregator,
    pub traders: TraderTracker,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one qualifying file into both accumulators.
    pub fn fold(&mut self, params: &StrategyParams, records: &[TraderRecord]) {
        let key = params.key();
        self.strategies.fold(params, records);

        for record in records {
            if let (Some(roi), Some(address)) = (record.roi, record.identity()) {
                self.traders.observe(key, address, roi);
            }
        }
    }

    /// Combine with a partial fold over files that came strictly after the
    /// files folded into `self`. The result equals folding everything in
    /// sequence.
    pub fn merge(&mut self, later: Aggregation) {
        self.strategies.merge(later.strategies);
        self.traders.merge(later.traders);
    }
}
