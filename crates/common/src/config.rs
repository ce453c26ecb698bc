use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Input directories scanned when no override is configured.
pub const DEFAULT_INPUT_DIRS: &[&str] = &[
    "trader_scan_results",
    "trader_analysis_results",
    "top_traders_results",
    "strategy_factory_results",
];

pub const DEFAULT_OUTPUT_PATH: &str = "strategy_factory_results/aggregated_results.json";

/// How many rows each report view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    /// Strategies written to the artifact.
    pub top_strategies: usize,
    /// Traders written to the artifact and printed.
    pub top_traders: usize,
    /// Strategy rows printed to the console.
    pub console_rows: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            top_strategies: 20,
            top_traders: 10,
            console_rows: 15,
        }
    }
}

/// Runtime configuration for one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base directory; relative input and output paths resolve against it.
    pub results_root: PathBuf,
    pub input_dirs: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub limits: ReportLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("."),
            input_dirs: DEFAULT_INPUT_DIRS.iter().map(PathBuf::from).collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            limits: ReportLimits::default(),
        }
    }
}

/// Optional overrides file (TOML).
///
/// Example `config/aggregator.toml`:
/// ```toml
/// input_dirs = ["trader_scan_results", "strategy_factory_results"]
/// output_path = "reports/aggregated_results.json"
/// top_strategies = 25
/// top_traders = 10
/// console_rows = 15
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOverrides {
    input_dirs: Option<Vec<PathBuf>>,
    output_path: Option<PathBuf>,
    top_strategies: Option<usize>,
    top_traders: Option<usize>,
    console_rows: Option<usize>,
}

impl Config {
    /// Load configuration: `.env` if present, then `RESULTS_ROOT`, then the
    /// TOML file named by `AGGREGATOR_CONFIG` if set.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let mut cfg = Config::default();
        if let Some(root) = optional_env("RESULTS_ROOT") {
            cfg.results_root = PathBuf::from(root);
        }
        if let Some(path) = optional_env("AGGREGATOR_CONFIG") {
            cfg = cfg.with_file(Path::new(&path))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a TOML file.
    pub fn with_file(self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        self.with_toml(&content)
    }

    /// Apply overrides from TOML text.
    pub fn with_toml(mut self, content: &str) -> Result<Self> {
        let overrides: FileOverrides =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

        if let Some(dirs) = overrides.input_dirs {
            self.input_dirs = dirs;
        }
        if let Some(path) = overrides.output_path {
            self.output_path = path;
        }
        if let Some(n) = overrides.top_strategies {
            self.limits.top_strategies = n;
        }
        if let Some(n) = overrides.top_traders {
            self.limits.top_traders = n;
        }
        if let Some(n) = overrides.console_rows {
            self.limits.console_rows = n;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let ReportLimits { top_strategies, top_traders, console_rows } = self.limits;
        if top_strategies == 0 || top_traders == 0 || console_rows == 0 {
            return Err(Error::Config("report limits must be greater than zero".into()));
        }
        if self.input_dirs.is_empty() {
            return Err(Error::Config("at least one input directory is required".into()));
        }
        Ok(())
    }

    /// Input directories resolved against `results_root`, in scan order.
    pub fn resolved_input_dirs(&self) -> Vec<PathBuf> {
        self.input_dirs.iter().map(|d| self.results_root.join(d)).collect()
    }

    pub fn resolved_output_path(&self) -> PathBuf {
        self.results_root.join(&self.output_path)
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
