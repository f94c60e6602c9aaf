//! Read-side projections of a board snapshot.
//!
//! Pure functions over `&Board`; callers decide which snapshot to pass.

use crate::{Board, Card, CardId, CardPriority, ColumnId};
use serde::Serialize;

/// Whole board grouped by column, in column order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub total_cards: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub column: ColumnId,
    pub title: String,
    pub card_count: usize,
    pub cards: Vec<Card>,
}

/// Compact card reference used in summaries and reorder results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardBrief {
    pub id: CardId,
    pub title: String,
    pub priority: CardPriority,
}

impl From<&Card> for CardBrief {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            title: card.title.clone(),
            priority: card.priority,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl PriorityCounts {
    fn record(&mut self, priority: CardPriority) {
        match priority {
            CardPriority::Low => self.low += 1,
            CardPriority::Medium => self.medium += 1,
            CardPriority::High => self.high += 1,
            CardPriority::Critical => self.critical += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub column: ColumnId,
    pub title: String,
    pub card_count: usize,
    pub priorities: PriorityCounts,
    /// Every label used in the column, in order of first appearance
    pub labels: Vec<String>,
    pub cards: Vec<CardBrief>,
}

pub fn board_view(board: &Board) -> BoardView {
    let columns = board
        .columns
        .iter()
        .map(|&column| {
            let cards: Vec<Card> = board.cards_in(column).cloned().collect();
            ColumnView {
                column,
                title: board.column_title(column).to_string(),
                card_count: cards.len(),
                cards,
            }
        })
        .collect();

    BoardView {
        columns,
        total_cards: board.cards.len(),
    }
}

pub fn column_summary(board: &Board, column: ColumnId) -> ColumnSummary {
    let mut priorities = PriorityCounts::default();
    let mut labels: Vec<String> = Vec::new();
    let mut cards = Vec::new();

    for card in board.cards_in(column) {
        priorities.record(card.priority);
        for label in &card.labels {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        cards.push(CardBrief::from(card));
    }

    ColumnSummary {
        column,
        title: board.column_title(column).to_string(),
        card_count: cards.len(),
        priorities,
        labels,
        cards,
    }
}
