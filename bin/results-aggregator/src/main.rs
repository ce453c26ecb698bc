use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::Config;
use ingest::DirectorySource;
use pipeline::Pipeline;
use report::{render, write_artifact, Artifact, Report};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("loading aggregator config")?;
    info!(
        root = %cfg.results_root.display(),
        dirs = cfg.input_dirs.len(),
        "Results aggregator starting"
    );

    // ── Ingest + fold ─────────────────────────────────────────────────────────
    let pipeline = Pipeline::new(Arc::new(DirectorySource::new()), cfg.resolved_input_dirs());
    let outcome = pipeline.run().await.context("scanning result directories")?;

    // ── Rank + report ─────────────────────────────────────────────────────────
    let report = Report::build(&outcome.aggregation, outcome.total_files, cfg.limits.top_traders);
    println!("{}", render(&report, cfg.limits.console_rows));

    let output = cfg.resolved_output_path();
    let artifact = Artifact::new(&report, cfg.limits.top_strategies, Utc::now());
    write_artifact(&output, &artifact)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    Ok(())
}
