use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use common::{Error, Result, ResultSource};

/// Reads result files from the local file system.
///
/// Files inside a directory are returned sorted by name so that two runs
/// over the same tree fold in the same order.
#[derive(Debug, Clone, Default)]
pub struct DirectorySource;

impl DirectorySource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultSource for DirectorySource {
    async fn list_json(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        let exists = tokio::fs::try_exists(dir).await.map_err(|e| Error::Source {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !exists {
            debug!(dir = %dir.display(), "Input directory not found, skipping");
            return Ok(None);
        }

        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| Error::Source {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
            if is_json && entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                files.push(path);
            }
        }
        files.sort();
        Ok(Some(files))
    }

    async fn read(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
