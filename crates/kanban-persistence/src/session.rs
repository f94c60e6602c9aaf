use crate::card_storage::{hydrate, CardStorage};
use crate::save_queue::{spawn_save_worker, SaveQueue};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{Board, BoardHandle, BoardStore};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A board wired to storage: hydrated at open, saved after every commit.
///
/// Must be opened inside a tokio runtime. Call [`PersistentBoard::shutdown`]
/// before exiting so queued saves are flushed.
pub struct PersistentBoard {
    board: BoardHandle,
    queue: Arc<SaveQueue>,
    worker: JoinHandle<usize>,
}

impl PersistentBoard {
    pub async fn open(storage: CardStorage) -> KanbanResult<Self> {
        let board = BoardStore::shared(Board::new());
        let (queue, rx) = SaveQueue::channel();
        let queue = Arc::new(queue);
        board.subscribe(queue.clone());
        let worker = spawn_save_worker(storage.clone(), rx);

        // Seeded boards are written back on this first commit
        let snapshot = hydrate(&board, &storage).await?;
        tracing::info!(
            "Board ready with {} cards ({})",
            snapshot.cards.len(),
            storage.location()
        );

        Ok(Self {
            board,
            queue,
            worker,
        })
    }

    pub fn board(&self) -> &BoardHandle {
        &self.board
    }

    /// Stop queueing saves and wait for the worker to write what is pending.
    pub async fn shutdown(self) -> KanbanResult<()> {
        self.queue.close();
        let writes = self
            .worker
            .await
            .map_err(|e| KanbanError::Internal(format!("save worker failed: {}", e)))?;
        tracing::debug!("Board closed after {} saves", writes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use kanban_domain::{seed_cards, CreateCard};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_seeds_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        let storage = CardStorage::new(Arc::new(JsonFileStore::new(&path)), "kanban-cards");

        let session = PersistentBoard::open(storage.clone()).await.unwrap();
        assert_eq!(session.board().snapshot().cards.len(), seed_cards().len());
        session.shutdown().await.unwrap();

        let saved = storage.load().await.unwrap().unwrap();
        assert_eq!(saved.len(), seed_cards().len());
    }

    #[tokio::test]
    async fn test_reopen_sees_previous_commits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        let storage = || CardStorage::new(Arc::new(JsonFileStore::new(&path)), "kanban-cards");

        let first = PersistentBoard::open(storage()).await.unwrap();
        let create = CreateCard::new("Remember me");
        first.board().dispatch(&create).unwrap();
        let expected = first.board().snapshot().cards.clone();
        first.shutdown().await.unwrap();

        let second = PersistentBoard::open(storage()).await.unwrap();
        assert_eq!(second.board().snapshot().cards, expected);
        second.shutdown().await.unwrap();
    }
}
