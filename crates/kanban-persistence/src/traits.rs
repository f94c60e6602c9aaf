use async_trait::async_trait;
use kanban_core::KanbanResult;

/// String key-value storage for the board.
///
/// Implementations handle different backends (a board file, memory, etc.).
/// Values are opaque strings; callers own the encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if nothing was ever stored
    async fn get(&self, key: &str) -> KanbanResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> KanbanResult<()>;

    /// Remove `key`. Removing an absent key is not an error
    async fn remove(&self, key: &str) -> KanbanResult<()>;

    /// Where the data lives, for log messages
    fn location(&self) -> String;
}
