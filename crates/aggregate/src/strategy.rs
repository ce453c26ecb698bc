use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use common::{StrategyKey, StrategyParams, TraderRecord};

/// Running performance for one `(historyDays, multiplier)` bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPerformance {
    #[serde(skip)]
    pub key: StrategyKey,
    pub strategy_id: String,
    pub history_days: u32,
    pub multiplier: f64,
    /// Highest ROI folded into this bucket; `-inf` until a record arrives.
    #[serde(rename = "bestROI")]
    pub best_roi: f64,
    pub best_win_rate: f64,
    /// Highest total P&L; `-inf` until a record arrives.
    #[serde(rename = "bestPnL")]
    pub best_pnl: f64,
    /// Mean ROI of the most recently folded file only.
    #[serde(rename = "avgROI")]
    pub avg_roi: f64,
    /// Mean win rate of the most recently folded file only.
    pub avg_win_rate: f64,
    pub traders_analyzed: usize,
    pub profitable_traders: usize,
    pub files_count: usize,
}

impl StrategyPerformance {
    pub fn new(key: StrategyKey) -> Self {
        Self {
            key,
            strategy_id: key.id(),
            history_days: key.history_days,
            multiplier: key.multiplier,
            best_roi: f64::NEG_INFINITY,
            best_win_rate: 0.0,
            best_pnl: f64::NEG_INFINITY,
            avg_roi: 0.0,
            avg_win_rate: 0.0,
            traders_analyzed: 0,
            profitable_traders: 0,
            files_count: 0,
        }
    }

    /// Fold one file's trader list. Records without an ROI are ignored.
    /// Returns how many records were counted.
    fn fold_batch(&mut self, records: &[TraderRecord]) -> usize {
        self.files_count += 1;

        let mut count = 0usize;
        let mut roi_sum = 0.0;
        let mut win_rate_sum = 0.0;

        for record in records {
            let Some(roi) = record.roi else { continue };
            let win_rate = record.win_rate_or_zero();

            count += 1;
            roi_sum += roi;
            win_rate_sum += win_rate;

            self.best_roi = self.best_roi.max(roi);
            self.best_win_rate = self.best_win_rate.max(win_rate);
            self.best_pnl = self.best_pnl.max(record.total_pnl_or_zero());
            if roi > 0.0 {
                self.profitable_traders += 1;
            }
        }

        self.traders_analyzed += count;
        // Overwrites whatever an earlier file for this key left behind.
        (self.avg_roi, self.avg_win_rate) = if count > 0 {
            (roi_sum / count as f64, win_rate_sum / count as f64)
        } else {
            (0.0, 0.0)
        };
        count
    }

    fn absorb(&mut self, later: StrategyPerformance) {
        self.best_roi = self.best_roi.max(later.best_roi);
        self.best_win_rate = self.best_win_rate.max(later.best_win_rate);
        self.best_pnl = self.best_pnl.max(later.best_pnl);
        self.avg_roi = later.avg_roi;
        self.avg_win_rate = later.avg_win_rate;
        self.traders_analyzed += later.traders_analyzed;
        self.profitable_traders += later.profitable_traders;
        self.files_count += later.files_count;
    }
}

/// Strategy buckets in discovery order.
#[derive(Debug, Clone, Default)]
pub struct StrategyAggregator {
    index: HashMap<StrategyKey, usize>,
    entries: Vec<StrategyPerformance>,
}

impl StrategyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one qualifying file. Folding the same batch twice counts it twice.
    pub fn fold(&mut self, params: &StrategyParams, records: &[TraderRecord]) -> usize {
        self.entry(params.key()).fold_batch(records)
    }

    /// Combine with a partial fold over files that came after this one's.
    pub fn merge(&mut self, later: StrategyAggregator) {
        for perf in later.entries {
            match self.index.get(&perf.key) {
                Some(&i) => self.entries[i].absorb(perf),
                None => {
                    self.index.insert(perf.key, self.entries.len());
                    self.entries.push(perf);
                }
            }
        }
    }

    pub fn get(&self, key: &StrategyKey) -> Option<&StrategyPerformance> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyPerformance> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, key: StrategyKey) -> &mut StrategyPerformance {
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                debug!(strategy = %key, "New strategy bucket");
                self.index.insert(key, self.entries.len());
                self.entries.push(StrategyPerformance::new(key));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(roi: Option<f64>, win_rate: Option<f64>, pnl: Option<f64>) -> TraderRecord {
        TraderRecord {
            address: Some("0x1".into()),
            roi,
            total_pnl: pnl,
            win_rate,
            copied_trades: None,
        }
    }

    #[test]
    fn empty_file_still_counts() {
        let mut agg = StrategyAggregator::new();
        let params = StrategyParams::new(30, 1.0);
        agg.fold(&params, &[]);
        agg.fold(&params, &[]);

        let perf = agg.get(&params.key()).unwrap();
        assert_eq!(perf.files_count, 2);
        assert_eq!(perf.traders_analyzed, 0);
        assert_eq!(perf.best_roi, f64::NEG_INFINITY);
        assert_eq!(perf.best_pnl, f64::NEG_INFINITY);
        assert_eq!(perf.avg_roi, 0.0);
    }

    #[test]
    fn batch_updates_bests_and_counters() {
        let mut agg = StrategyAggregator::new();
        let params = StrategyParams::new(7, 2.0);
        let counted = agg.fold(
            &params,
            &[
                rec(Some(10.0), Some(55.0), Some(100.0)),
                rec(Some(-4.0), None, Some(-20.0)),
                rec(None, Some(99.0), Some(1_000.0)),
                rec(Some(0.0), Some(40.0), None),
            ],
        );

        assert_eq!(counted, 3);
        let perf = agg.get(&params.key()).unwrap();
        assert_eq!(perf.strategy_id, "7d_2x");
        assert_eq!(perf.best_roi, 10.0);
        assert_eq!(perf.best_win_rate, 55.0);
        assert_eq!(perf.best_pnl, 100.0);
        assert_eq!(perf.traders_analyzed, 3);
        assert_eq!(perf.profitable_traders, 1);
        assert!((perf.avg_roi - 2.0).abs() < 1e-9);
        assert!((perf.avg_win_rate - 95.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn average_reflects_last_file_only() {
        let mut agg = StrategyAggregator::new();
        let params = StrategyParams::new(14, 1.0);
        agg.fold(&params, &[rec(Some(100.0), Some(80.0), None), rec(Some(50.0), Some(60.0), None)]);
        agg.fold(&params, &[rec(Some(2.0), Some(10.0), None), rec(Some(4.0), Some(30.0), None)]);

        let perf = agg.get(&params.key()).unwrap();
        assert_eq!(perf.avg_roi, 3.0);
        assert_eq!(perf.avg_win_rate, 20.0);
        assert_eq!(perf.best_roi, 100.0);
        assert_eq!(perf.traders_analyzed, 4);
        assert_eq!(perf.files_count, 2);
    }

    #[test]
    fn empty_last_file_resets_average() {
        let mut agg = StrategyAggregator::new();
        let params = StrategyParams::new(14, 1.0);
        agg.fold(&params, &[rec(Some(8.0), Some(50.0), None)]);
        agg.fold(&params, &[rec(None, None, None)]);

        let perf = agg.get(&params.key()).unwrap();
        assert_eq!(perf.avg_roi, 0.0);
        assert_eq!(perf.avg_win_rate, 0.0);
        assert_eq!(perf.best_roi, 8.0);
    }

    #[test]
    fn buckets_keep_discovery_order() {
        let mut agg = StrategyAggregator::new();
        agg.fold(&StrategyParams::new(30, 1.0), &[]);
        agg.fold(&StrategyParams::new(7, 1.0), &[]);
        agg.fold(&StrategyParams::new(30, 1.0), &[]);
        agg.fold(&StrategyParams::new(7, 1.5), &[]);

        let ids: Vec<_> = agg.iter().map(|p| p.strategy_id.as_str()).collect();
        assert_eq!(ids, vec!["30d_1x", "7d_1x", "7d_1.5x"]);
    }

    #[test]
    fn serializes_with_report_field_names() {
        let mut agg = StrategyAggregator::new();
        agg.fold(&StrategyParams::new(30, 1.0), &[rec(Some(5.0), Some(50.0), Some(12.0))]);
        let json = serde_json::to_string(agg.iter().next().unwrap()).unwrap();
        for field in [
            "strategyId", "historyDays", "multiplier", "bestROI", "bestWinRate", "bestPnL",
            "avgROI", "avgWinRate", "tradersAnalyzed", "profitableTraders", "filesCount",
        ] {
            assert!(json.contains(&format!("\"{field}\"")), "missing {field} in {json}");
        }
        assert!(!json.contains("\"key\""));
    }
}
