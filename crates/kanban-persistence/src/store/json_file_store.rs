use crate::traits::KeyValueStore;
use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Key-value store backed by a single JSON object file.
///
/// Every key lives in one `{ "key": "value", ... }` object. Writes replace the
/// whole file atomically (temp file in the same directory, then rename), so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

type Entries = BTreeMap<String, String>;

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> KanbanResult<Entries> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Entries::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            KanbanError::Serialization(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Entries to rewrite on the next write. A corrupt file is replaced
    /// rather than blocking every future save.
    async fn entries_for_write(&self) -> KanbanResult<Entries> {
        match self.read_entries().await {
            Err(KanbanError::Serialization(reason)) => {
                tracing::warn!("Replacing unreadable store file: {}", reason);
                Ok(Entries::new())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &Entries) -> KanbanResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        let path = self.path.clone();
        let len = bytes.len();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| KanbanError::Internal(format!("write task failed: {}", e)))??;

        tracing::debug!("Atomically wrote {} bytes to {}", len, self.path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
    // Temp file in the same directory keeps the rename on one filesystem
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(data)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| KanbanError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> KanbanResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries_for_write().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
