use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use crate::card::{Card, CardId};
use crate::column::{ColumnId, ColumnMeta};

/// The aggregate root: ordered columns plus every card.
///
/// Column membership is a field on each card. The order of `cards` is the only
/// source of display order within a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: Vec<ColumnId>,
    pub column_meta: BTreeMap<ColumnId, ColumnMeta>,
    pub cards: Vec<Card>,
}

impl Board {
    /// Reference four-column board with no cards.
    pub fn new() -> Self {
        Self {
            columns: ColumnId::ALL.to_vec(),
            column_meta: ColumnId::ALL
                .into_iter()
                .map(|column| (column, ColumnMeta::reference(column)))
                .collect(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::new()
        }
    }

    /// Column new cards land in when none is given.
    pub fn default_column(&self) -> ColumnId {
        self.columns.first().copied().unwrap_or(ColumnId::Backlog)
    }

    pub fn column_title(&self, column: ColumnId) -> &str {
        self.column_meta
            .get(&column)
            .map(|meta| meta.label.as_str())
            .unwrap_or_else(|| column.as_str())
    }

    pub fn find_card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Look up a card by its wire id. Ids that are not UUIDs never match.
    pub fn find_card_str(&self, id: &str) -> Option<&Card> {
        Uuid::parse_str(id.trim())
            .ok()
            .and_then(|id| self.find_card(id))
    }

    /// Cards in `column`, in display order.
    pub fn cards_in(&self, column: ColumnId) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |c| c.column == column)
    }

    pub fn card_count(&self, column: ColumnId) -> usize {
        self.cards_in(column).count()
    }

    /// Check the collection-level invariants: unique ids and known columns.
    pub fn validate_cards(columns: &[ColumnId], cards: &[Card]) -> KanbanResult<()> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in cards {
            if !seen.insert(card.id) {
                return Err(KanbanError::Validation(format!(
                    "duplicate card id {}",
                    card.id
                )));
            }
            if !columns.contains(&card.column) {
                return Err(KanbanError::Validation(format!(
                    "card {} references unknown column '{}'",
                    card.id, card.column
                )));
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
