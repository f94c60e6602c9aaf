//! The board's card collection as one stored value.
//!
//! Cards are kept as a JSON array under a single key. Columns are fixed at
//! runtime and never stored.

use crate::traits::KeyValueStore;
use kanban_core::{config::DEFAULT_STORAGE_KEY, KanbanError, KanbanResult};
use kanban_domain::{seed_cards, Board, BoardStore, Card, LoadCards};
use std::sync::Arc;

#[derive(Clone)]
pub struct CardStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CardStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn with_default_key(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn location(&self) -> String {
        format!("{}#{}", self.store.location(), self.key)
    }

    pub fn encode(cards: &[Card]) -> KanbanResult<String> {
        serde_json::to_string(cards).map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    pub fn decode(raw: &str) -> KanbanResult<Vec<Card>> {
        serde_json::from_str(raw).map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    /// Stored cards, or `None` when nothing usable has been saved yet.
    ///
    /// A blank value counts as absent. Malformed JSON is an error.
    pub async fn load(&self) -> KanbanResult<Option<Vec<Card>>> {
        match self.store.get(&self.key).await? {
            Some(raw) if !raw.trim().is_empty() => Self::decode(&raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Stored cards, or the seed set when the value is absent, unreadable, or
    /// the store itself fails. Never errors.
    ///
    /// A stored empty array is a real (empty) board and is returned as is.
    pub async fn load_or_seed(&self) -> Vec<Card> {
        match self.load().await {
            Ok(Some(cards)) => {
                tracing::info!("Loaded {} cards from {}", cards.len(), self.location());
                cards
            }
            Ok(None) => {
                tracing::info!("No saved board at {}, using seed cards", self.location());
                seed_cards()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load board from {}: {}. Using seed cards",
                    self.location(),
                    e
                );
                seed_cards()
            }
        }
    }

    pub async fn save(&self, cards: &[Card]) -> KanbanResult<()> {
        let encoded = Self::encode(cards)?;
        self.store.set(&self.key, &encoded).await?;
        tracing::debug!("Saved {} cards to {}", cards.len(), self.location());
        Ok(())
    }
}

/// Load the stored cards into `board` as its first transition.
///
/// Decoded cards that break collection invariants (duplicate ids, unknown
/// columns) are replaced by the seed set.
pub async fn hydrate(board: &BoardStore, storage: &CardStorage) -> KanbanResult<Arc<Board>> {
    let cards = storage.load_or_seed().await;
    match board.dispatch(&LoadCards { cards }) {
        Ok(snapshot) => Ok(snapshot),
        Err(e) => {
            tracing::warn!("Stored cards rejected: {}. Using seed cards", e);
            board.dispatch(&LoadCards {
                cards: seed_cards(),
            })
        }
    }
}
