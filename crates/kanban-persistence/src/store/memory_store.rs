use crate::traits::KeyValueStore;
use async_trait::async_trait;
use kanban_core::KanbanResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local store. Nothing survives the process; used by tests and
/// throwaway boards.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        store
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KanbanResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
