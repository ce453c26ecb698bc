use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Result source error at '{path}': {reason}")]
    Source { path: PathBuf, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
