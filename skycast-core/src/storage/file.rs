use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use directories::ProjectDirs;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;
use tracing::warn;

use super::KeyValueStore;

/// Key-value store backed by one JSON document on disk.
///
/// Every write rewrites the whole file; the document is a flat string
/// map, small enough that this never matters. An unreadable file is
/// treated as empty rather than refusing to start.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cells: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at the platform data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::at_path(Self::store_file_path()?))
    }

    /// Open the store at an explicit path, used by tests.
    pub fn at_path(path: PathBuf) -> Self {
        let cells = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "starting with empty preferences");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, cells: Mutex::new(cells) }
    }

    fn store_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("preferences.json"))
    }

    fn write_out(&self, cells: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let encoded =
            serde_json::to_string_pretty(cells).context("Failed to serialize preferences")?;

        fs::write(&self.path, encoded)
            .with_context(|| format!("Failed to write preferences file: {}", self.path.display()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cells.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cells = self.cells.lock().await;
        cells.insert(key.to_string(), value.to_string());
        self.write_out(&cells)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut cells = self.cells.lock().await;
        if cells.remove(key).is_some() {
            self.write_out(&cells)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = FileStore::at_path(path.clone());
        store.set("alpha", "1").await.unwrap();
        store.set("beta", "2").await.unwrap();
        store.remove("alpha").await.unwrap();

        let reopened = FileStore::at_path(path);
        assert_eq!(reopened.get("alpha").await.unwrap(), None);
        assert_eq!(reopened.get("beta").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{{{not json").unwrap();

        let store = FileStore::at_path(path);
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("preferences.json"));

        store.remove("ghost").await.unwrap();
        assert_eq!(store.get("ghost").await.unwrap(), None);
    }
}
