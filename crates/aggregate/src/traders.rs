use std::collections::HashMap;

use common::StrategyKey;

/// Best result seen for one trader address across every strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct TraderAggregate {
    pub best_roi: f64,
    /// Strategy that produced `best_roi`. Ties keep the earlier one.
    pub best_strategy: StrategyKey,
    pub times_found: usize,
}

/// Deduplicates trader occurrences by address, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct TraderTracker {
    index: HashMap<String, usize>,
    entries: Vec<(String, TraderAggregate)>,
}

impl TraderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, strategy: StrategyKey, address: &str, roi: f64) {
        match self.index.get(address) {
            Some(&i) => {
                let agg = &mut self.entries[i].1;
                agg.times_found += 1;
                if roi > agg.best_roi {
                    agg.best_roi = roi;
                    agg.best_strategy = strategy;
                }
            }
            None => {
                self.index.insert(address.to_string(), self.entries.len());
                self.entries.push((
                    address.to_string(),
                    TraderAggregate {
                        best_roi: roi,
                        best_strategy: strategy,
                        times_found: 1,
                    },
                ));
            }
        }
    }

    /// Combine with a tracker built from files that came after this one's.
    pub fn merge(&mut self, later: TraderTracker) {
        for (address, theirs) in later.entries {
            match self.index.get(&address) {
                Some(&i) => {
                    let ours = &mut self.entries[i].1;
                    ours.times_found += theirs.times_found;
                    if theirs.best_roi > ours.best_roi {
                        ours.best_roi = theirs.best_roi;
                        ours.best_strategy = theirs.best_strategy;
                    }
                }
                None => {
                    self.index.insert(address.clone(), self.entries.len());
                    self.entries.push((address, theirs));
                }
            }
        }
    }

    pub fn get(&self, address: &str) -> Option<&TraderAggregate> {
        self.index.get(address).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraderAggregate)> {
        self.entries.iter().map(|(a, t)| (a.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
