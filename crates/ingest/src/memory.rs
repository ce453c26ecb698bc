use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use common::{Error, Result, ResultSource};

/// In-memory result files for tests and dry runs.
///
/// Directories list their files in insertion order, which lets callers pin
/// an exact fold order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dirs: HashMap<PathBuf, Vec<PathBuf>>,
    contents: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an (initially empty) directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.entry(dir.into()).or_default();
        self
    }

    /// Add a file under `dir`. Non-`.json` names are stored but never listed.
    pub fn with_file(
        mut self,
        dir: impl Into<PathBuf>,
        name: &str,
        content: impl Into<String>,
    ) -> Self {
        let dir = dir.into();
        let path = dir.join(name);
        self.contents.insert(path.clone(), content.into());
        self.dirs.entry(dir).or_default().push(path);
        self
    }

    /// List a file under `dir` whose read will fail.
    pub fn with_unreadable(mut self, dir: impl Into<PathBuf>, name: &str) -> Self {
        let dir = dir.into();
        let path = dir.join(name);
        self.dirs.entry(dir).or_default().push(path);
        self
    }
}

#[async_trait]
impl ResultSource for MemorySource {
    async fn list_json(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        Ok(self.dirs.get(dir).map(|files| {
            files
                .iter()
                .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
                .cloned()
                .collect()
        }))
    }

    async fn read(&self, path: &Path) -> Result<String> {
        self.contents.get(path).cloned().ok_or_else(|| Error::Source {
            path: path.to_path_buf(),
            reason: "no such in-memory file".into(),
        })
    }
}
