use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::Result;

/// Abstraction over where result files come from.
///
/// `DirectorySource` implements this against the real file system.
/// `MemorySource` implements this for tests and dry runs.
///
/// Only the pipeline driver should hold a `dyn ResultSource`; everything
/// downstream of it works on already-read file contents.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// List the `*.json` files directly inside `dir`, in processing order.
    /// Returns `Ok(None)` when the directory does not exist.
    async fn list_json(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>>;

    /// Read a file's full contents as UTF-8 text.
    async fn read(&self, path: &Path) -> Result<String>;
}
