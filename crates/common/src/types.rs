use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::Value;

/// Multiplier assumed when a result file's `config` omits it.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Strategy parameters as found under `config` in a result file.
///
/// Only `history_days` and `multiplier` take part in bucketing; the other
/// two are carried for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub history_days: u32,
    pub multiplier: f64,
    pub min_order_size: Option<f64>,
    pub starting_capital: Option<f64>,
}

impl StrategyParams {
    pub fn new(history_days: u32, multiplier: f64) -> Self {
        Self {
            history_days,
            multiplier,
            min_order_size: None,
            starting_capital: None,
        }
    }

    pub fn key(&self) -> StrategyKey {
        StrategyKey {
            history_days: self.history_days,
            multiplier: self.multiplier,
        }
    }
}

/// Aggregation bucket: `(historyDays, multiplier)`.
///
/// Equality and hashing compare the multiplier bit-for-bit so the key can
/// live in a `HashMap`.
#[derive(Debug, Clone, Copy)]
pub struct StrategyKey {
    pub history_days: u32,
    pub multiplier: f64,
}

impl StrategyKey {
    pub fn new(history_days: u32, multiplier: f64) -> Self {
        Self { history_days, multiplier }
    }

    /// Human-readable id, e.g. `30d_1x` or `7d_2.5x`.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for StrategyKey {
    fn eq(&self, other: &Self) -> bool {
        self.history_days == other.history_days
            && self.multiplier.to_bits() == other.multiplier.to_bits()
    }
}

impl Eq for StrategyKey {}

impl Hash for StrategyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.history_days.hash(state);
        self.multiplier.to_bits().hash(state);
    }
}

impl fmt::Display for StrategyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d_{}x", self.history_days, self.multiplier)
    }
}

/// One trader entry inside a `traders` or `results` list.
///
/// Every field is optional at this level and read independently: a field
/// with the wrong JSON type becomes `None` without affecting its siblings.
/// Only a missing ROI makes the aggregators drop the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraderRecord {
    pub address: Option<String>,
    pub roi: Option<f64>,
    pub total_pnl: Option<f64>,
    pub win_rate: Option<f64>,
    pub copied_trades: Option<u64>,
}

impl TraderRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            address: value.get("address").and_then(Value::as_str).map(str::to_string),
            roi: value.get("roi").and_then(Value::as_f64),
            total_pnl: value.get("totalPnl").and_then(Value::as_f64),
            win_rate: value.get("winRate").and_then(Value::as_f64),
            copied_trades: value.get("copiedTrades").and_then(Value::as_u64),
        }
    }

    /// Win rate in percent, `0` when absent.
    pub fn win_rate_or_zero(&self) -> f64 {
        self.win_rate.unwrap_or(0.0)
    }

    /// Total P&L, `0` when absent.
    pub fn total_pnl_or_zero(&self) -> f64 {
        self.total_pnl.unwrap_or(0.0)
    }

    /// Address usable as a dedup identity: present and non-empty.
    pub fn identity(&self) -> Option<&str> {
        self.address.as_deref().filter(|a| !a.is_empty())
    }
}
