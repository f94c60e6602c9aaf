//! Card sorting functionality.
//!
//! Used by both the tool surface and the terminal UI so "prioritize" means the
//! same thing from either side.

use crate::{Board, Card, CardId, ColumnId};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Compare by priority rank, most urgent first.
pub fn compare_priority(a: &Card, b: &Card) -> Ordering {
    a.priority.rank().cmp(&b.priority.rank())
}

/// Stable sort by priority. Works with both `&Card` and `Card` elements;
/// cards of equal priority keep their relative order.
pub fn sort_by_priority<T: Borrow<Card>>(cards: &mut [T]) {
    cards.sort_by(|a, b| compare_priority(a.borrow(), b.borrow()));
}

/// The cards of `column` in priority order, ready to hand to a reorder.
pub fn prioritized_column(board: &Board, column: ColumnId) -> Vec<&Card> {
    let mut cards: Vec<&Card> = board.cards_in(column).collect();
    sort_by_priority(&mut cards);
    cards
}

pub fn prioritized_ids(board: &Board, column: ColumnId) -> Vec<CardId> {
    prioritized_column(board, column)
        .into_iter()
        .map(|c| c.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardPriority;

    fn card(title: &str, column: ColumnId, priority: CardPriority) -> Card {
        let mut card = Card::new(title.to_string(), column);
        card.priority = priority;
        card
    }

    #[test]
    fn test_compare_priority() {
        let low = card("Low", ColumnId::Todo, CardPriority::Low);
        let critical = card("Critical", ColumnId::Todo, CardPriority::Critical);
        assert_eq!(compare_priority(&critical, &low), Ordering::Less);
        assert_eq!(compare_priority(&low, &critical), Ordering::Greater);
        assert_eq!(compare_priority(&low, &low), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let first = card("First", ColumnId::Todo, CardPriority::High);
        let second = card("Second", ColumnId::Todo, CardPriority::High);
        let urgent = card("Urgent", ColumnId::Todo, CardPriority::Critical);

        let mut cards = vec![first.clone(), second.clone(), urgent.clone()];
        sort_by_priority(&mut cards);

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Urgent", "First", "Second"]);
    }

    #[test]
    fn test_prioritized_ids_only_covers_column() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let b = card("B", ColumnId::Todo, CardPriority::Critical);
        let other = card("Other", ColumnId::Done, CardPriority::Critical);
        let c = card("C", ColumnId::Todo, CardPriority::Medium);
        let board = Board::with_cards(vec![a.clone(), b.clone(), other, c.clone()]);

        assert_eq!(
            prioritized_ids(&board, ColumnId::Todo),
            vec![b.id, c.id, a.id]
        );
        assert!(prioritized_ids(&board, ColumnId::Backlog).is_empty());
    }
}
