//! Fire-and-forget saving of committed boards.
//!
//! [`SaveQueue`] observes the board and queues every committed card list.
//! A worker task drains the queue and writes through [`CardStorage`]. Dispatch
//! never waits on storage, and a failed save is logged and dropped.

use crate::card_storage::CardStorage;
use kanban_domain::{Board, BoardObserver, Card};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct SaveQueue {
    save_tx: Mutex<Option<mpsc::UnboundedSender<Vec<Card>>>>,
}

impl SaveQueue {
    /// Returns the queue and the receiver its worker should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Vec<Card>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                save_tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    pub fn enqueue(&self, cards: Vec<Card>) {
        if let Some(ref tx) = *self.save_tx.lock() {
            tracing::debug!("Queueing {} cards for save", cards.len());
            // Send only fails if the worker is gone
            if let Err(e) = tx.send(cards) {
                tracing::error!("Failed to queue save of {} cards: channel closed", e.0.len());
            }
        } else {
            tracing::debug!("Save queue closed - skipping save");
        }
    }

    /// Close the channel so the worker drains what is queued and exits.
    pub fn close(&self) {
        self.save_tx.lock().take();
    }

    pub fn is_open(&self) -> bool {
        self.save_tx.lock().is_some()
    }
}

impl BoardObserver for SaveQueue {
    fn on_commit(&self, board: &Board) {
        self.enqueue(board.cards.clone());
    }
}

/// Spawn the worker that writes queued card lists until the queue closes.
///
/// Bursts are coalesced: only the newest list waiting in the channel is
/// written. Resolves to the number of writes attempted.
pub fn spawn_save_worker(
    storage: CardStorage,
    mut rx: mpsc::UnboundedReceiver<Vec<Card>>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut writes = 0;
        while let Some(mut cards) = rx.recv().await {
            while let Ok(newer) = rx.try_recv() {
                cards = newer;
            }
            writes += 1;
            if let Err(e) = storage.save(&cards).await {
                tracing::error!("Failed to save board to {}: {}", storage.location(), e);
            }
        }
        tracing::debug!("Save worker finished after {} writes", writes);
        writes
    })
}
