use std::cmp::Ordering;

use aggregate::{StrategyAggregator, StrategyPerformance, TraderAggregate, TraderTracker};

/// All strategies by `best_roi`, highest first. Equal values keep discovery
/// order.
pub fn rank_strategies(strategies: &StrategyAggregator) -> Vec<&StrategyPerformance> {
    let mut ranked: Vec<_> = strategies.iter().collect();
    ranked.sort_by(|a, b| descending(a.best_roi, b.best_roi));
    ranked
}

/// Top `limit` traders by `best_roi`, highest first. Equal values keep
/// discovery order.
pub fn rank_traders(traders: &TraderTracker, limit: usize) -> Vec<(&str, &TraderAggregate)> {
    let mut ranked: Vec<_> = traders.iter().collect();
    ranked.sort_by(|(_, a), (_, b)| descending(a.best_roi, b.best_roi));
    ranked.truncate(limit);
    ranked
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{StrategyKey, StrategyParams, TraderRecord};

    fn one(roi: f64) -> Vec<TraderRecord> {
        vec![TraderRecord {
            roi: Some(roi),
            ..Default::default()
        }]
    }

    #[test]
    fn strategies_sort_descending_and_stable() {
        let mut agg = StrategyAggregator::new();
        agg.fold(&StrategyParams::new(1, 1.0), &one(5.0));
        agg.fold(&StrategyParams::new(2, 1.0), &one(20.0));
        agg.fold(&StrategyParams::new(3, 1.0), &one(20.0));
        agg.fold(&StrategyParams::new(4, 1.0), &one(-3.0));

        let days: Vec<_> = rank_strategies(&agg).iter().map(|p| p.history_days).collect();
        assert_eq!(days, vec![2, 3, 1, 4]);
    }

    #[test]
    fn strategy_without_records_ranks_last() {
        let mut agg = StrategyAggregator::new();
        agg.fold(&StrategyParams::new(1, 1.0), &[]);
        agg.fold(&StrategyParams::new(2, 1.0), &one(-50.0));

        let days: Vec<_> = rank_strategies(&agg).iter().map(|p| p.history_days).collect();
        assert_eq!(days, vec![2, 1]);
    }

    #[test]
    fn traders_truncate_to_limit() {
        let key = StrategyKey::new(7, 1.0);
        let mut tracker = TraderTracker::new();
        for i in 0..15 {
            tracker.observe(key, &format!("0x{i:02}"), i as f64);
        }

        let top = rank_traders(&tracker, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].0, "0x14");
        assert_eq!(top[9].0, "0x05");
    }

    #[test]
    fn traders_fewer_than_limit_are_all_kept() {
        let key = StrategyKey::new(7, 1.0);
        let mut tracker = TraderTracker::new();
        tracker.observe(key, "0xa", 1.0);
        tracker.observe(key, "0xb", 1.0);
        tracker.observe(key, "0xc", 2.0);

        let top: Vec<_> = rank_traders(&tracker, 10).into_iter().map(|(a, _)| a).collect();
        assert_eq!(top, vec!["0xc", "0xa", "0xb"]);
    }
}
