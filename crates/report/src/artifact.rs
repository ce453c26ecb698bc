use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use aggregate::{StrategyPerformance, TraderAggregate};
use common::Result;

use crate::{Report, Summary};

/// One entry of `topTraders` with the address inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTraderRow {
    pub address: String,
    #[serde(rename = "bestROI")]
    pub best_roi: f64,
    pub best_strategy: String,
    pub times_found: usize,
}

impl TopTraderRow {
    fn new(address: &str, agg: &TraderAggregate) -> Self {
        Self {
            address: address.to_string(),
            best_roi: agg.best_roi,
            best_strategy: agg.best_strategy.id(),
            times_found: agg.times_found,
        }
    }
}

/// The persisted summary document. Rewritten whole on every run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact<'a> {
    pub timestamp: DateTime<Utc>,
    pub summary: &'a Summary,
    pub strategies: &'a [&'a StrategyPerformance],
    pub top_traders: Vec<TopTraderRow>,
}

impl<'a> Artifact<'a> {
    pub fn new(report: &'a Report<'a>, strategy_limit: usize, timestamp: DateTime<Utc>) -> Self {
        let n = strategy_limit.min(report.strategies.len());
        Self {
            timestamp,
            summary: &report.summary,
            strategies: &report.strategies[..n],
            top_traders: report
                .top_traders
                .iter()
                .map(|(address, agg)| TopTraderRow::new(address, agg))
                .collect(),
        }
    }
}

/// Serialize `artifact` to `path`, creating parent directories and
/// replacing any previous file.
pub async fn write_artifact(path: &Path, artifact: &Artifact<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let body = serde_json::to_string_pretty(artifact)?;
    tokio::fs::write(path, body).await?;
    info!(path = %path.display(), "Aggregated results saved");
    Ok(())
}
