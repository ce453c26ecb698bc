use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use aggregate::Aggregation;
use common::{Result, ResultSource};
use ingest::{normalize_str, Reject};

/// Final state of one run, ready for ranking.
#[derive(Debug)]
pub struct RunOutcome {
    pub aggregation: Aggregation,
    /// Every `*.json` file listed, whether or not it qualified.
    pub total_files: usize,
}

/// Partial fold over a single input directory.
#[derive(Debug)]
pub struct DirectoryFold {
    pub aggregation: Aggregation,
    pub files: usize,
}

/// Drives a run: lists each input directory, reads its files one at a time,
/// normalizes them and folds the qualifying ones.
pub struct Pipeline {
    source: Arc<dyn ResultSource>,
    dirs: Vec<PathBuf>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn ResultSource>, dirs: Vec<PathBuf>) -> Self {
        Self { source, dirs }
    }

    /// Fold every directory in order and merge the partials.
    ///
    /// Only listing failures on an existing directory abort the run; bad
    /// files are skipped.
    pub async fn run(&self) -> Result<RunOutcome> {
        let mut aggregation = Aggregation::new();
        let mut total_files = 0;

        for dir in &self.dirs {
            let Some(partial) = self.fold_directory(dir).await? else {
                continue;
            };
            total_files += partial.files;
            aggregation.merge(partial.aggregation);
        }

        info!(
            files = total_files,
            strategies = aggregation.strategies.len(),
            traders = aggregation.traders.len(),
            "Aggregation complete"
        );
        Ok(RunOutcome { aggregation, total_files })
    }

    /// Fold one directory independently. `None` if it does not exist.
    pub async fn fold_directory(&self, dir: &Path) -> Result<Option<DirectoryFold>> {
        let Some(files) = self.source.list_json(dir).await? else {
            return Ok(None);
        };
        info!(dir = %dir.display(), files = files.len(), "Scanning results directory");

        let mut aggregation = Aggregation::new();
        for path in &files {
            if let Err(reason) = self.fold_file(&mut aggregation, path).await {
                debug!(file = %path.display(), %reason, "Skipping result file");
            }
        }

        Ok(Some(DirectoryFold {
            aggregation,
            files: files.len(),
        }))
    }

    async fn fold_file(&self, aggregation: &mut Aggregation, path: &Path) -> Result<(), Reject> {
        let text = self.source.read(path).await.map_err(|_| Reject::Unreadable)?;
        let file = normalize_str(&text)?;
        aggregation.fold(&file.params, &file.records);
        debug!(
            file = %path.display(),
            shape = ?file.shape,
            strategy = %file.params.key(),
            records = file.records.len(),
            "Folded result file"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StrategyKey;
    use ingest::MemorySource;

    fn scan(days: u32, traders: &str) -> String {
        format!(r#"{{"config":{{"historyDays":{days}}},"traders":[{traders}]}}"#)
    }

    fn pipeline(source: MemorySource, dirs: &[&str]) -> Pipeline {
        Pipeline::new(Arc::new(source), dirs.iter().map(PathBuf::from).collect())
    }

    #[tokio::test]
    async fn missing_directories_are_skipped() {
        let source = MemorySource::new().with_file("scans", "a.json", scan(7, ""));
        let outcome = pipeline(source, &["absent", "scans"]).run().await.unwrap();
        assert_eq!(outcome.total_files, 1);
        assert_eq!(outcome.aggregation.strategies.len(), 1);
    }

    #[tokio::test]
    async fn bad_files_count_toward_total_but_not_aggregation() {
        let source = MemorySource::new()
            .with_file("d", "good.json", scan(7, r#"{"address":"0xa","roi":5}"#))
            .with_file("d", "garbage.json", "not json")
            .with_file("d", "shape.json", r#"{"config":{"historyDays":7},"rows":[]}"#)
            .with_file(
                "d",
                "nodays.json",
                r#"{"config":{"multiplier":2},"traders":[{"address":"0xb","roi":99}]}"#,
            )
            .with_unreadable("d", "locked.json");

        let outcome = pipeline(source, &["d"]).run().await.unwrap();
        assert_eq!(outcome.total_files, 5);

        let agg = &outcome.aggregation;
        assert_eq!(agg.strategies.len(), 1);
        let perf = agg.strategies.get(&StrategyKey::new(7, 1.0)).unwrap();
        assert_eq!(perf.files_count, 1);
        assert_eq!(perf.best_roi, 5.0);
        assert!(agg.traders.get("0xb").is_none());
    }

    #[tokio::test]
    async fn later_directory_overwrites_average() {
        let source = MemorySource::new()
            .with_file("first", "a.json", scan(7, r#"{"roi":10},{"roi":30}"#))
            .with_file(
                "second",
                "b.json",
                r#"{"config":{"historyDays":7},"results":[{"roi":1},{"roi":3}]}"#,
            );

        let outcome = pipeline(source, &["first", "second"]).run().await.unwrap();
        let perf = outcome.aggregation.strategies.get(&StrategyKey::new(7, 1.0)).unwrap();
        assert_eq!(perf.avg_roi, 2.0);
        assert_eq!(perf.best_roi, 30.0);
        assert_eq!(perf.files_count, 2);
        assert_eq!(perf.traders_analyzed, 4);
    }
}
