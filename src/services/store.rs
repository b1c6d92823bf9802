//! Key/value persistence for the timer registry

use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use serde_json::{Map, Value};
use tracing::debug;

/// Key the registry is saved under
pub const STORAGE_KEY: &str = "timers";

pub trait TimerStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<Value>>> + Send;
    fn set(&self, key: &str, value: Value) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Stores every key in a single JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> anyhow::Result<Map<String, Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

impl TimerStore for JsonFileStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let mut all = self.read_all().await?;
        Ok(all.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&Value::Object(all))?;
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!("Saved '{}' to {}", key, self.path.display());
        Ok(())
    }
}

/// Keeps values in memory only
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn file_store_round_trips_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("timers.json"));

        assert_eq!(store.get(STORAGE_KEY).await.unwrap(), None);

        store.set("other", json!(1)).await.unwrap();
        store.set(STORAGE_KEY, json!({"tea": {"remaining": 5}})).await.unwrap();

        assert_eq!(store.get(STORAGE_KEY).await.unwrap(), Some(json!({"tea": {"remaining": 5}})));
        assert_eq!(store.get("other").await.unwrap(), Some(json!(1)));
    }

    #[tokio::test]
    async fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.get(STORAGE_KEY).await.is_err());
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, json!([])).await.unwrap();
        assert_eq!(store.get(STORAGE_KEY).await.unwrap(), Some(json!([])));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }
}
