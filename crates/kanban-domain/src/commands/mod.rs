use kanban_core::{KanbanError, KanbanResult};

use crate::{Board, Card, CardId, ColumnId};

pub mod board_commands;
pub mod card_commands;
pub mod column_commands;

pub use board_commands::*;
pub use card_commands::*;
pub use column_commands::*;

/// Trait for board transitions.
/// Commands represent intent; the UI and the tool surface dispatch the same ones.
pub trait Command: Send + Sync {
    /// Apply this command to the working copy of the board
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Working copy a command mutates. Column set is read-only at runtime.
pub struct CommandContext<'a> {
    pub columns: &'a [ColumnId],
    pub cards: &'a mut Vec<Card>,
}

impl CommandContext<'_> {
    pub fn default_column(&self) -> ColumnId {
        self.columns.first().copied().unwrap_or(ColumnId::Backlog)
    }

    pub fn ensure_column(&self, column: ColumnId) -> KanbanResult<()> {
        if self.columns.contains(&column) {
            Ok(())
        } else {
            Err(KanbanError::Validation(format!(
                "column '{}' is not on this board",
                column
            )))
        }
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }
}

/// Produce the board that results from applying `command` to `board`.
///
/// `board` itself is never modified; on error no new board exists.
pub fn reduce(board: &Board, command: &dyn Command) -> KanbanResult<Board> {
    let mut next = board.clone();
    let mut context = CommandContext {
        columns: &next.columns,
        cards: &mut next.cards,
    };
    command.execute(&mut context)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardPriority;

    fn board_with(cards: Vec<Card>) -> Board {
        Board::with_cards(cards)
    }

    fn card(title: &str, column: ColumnId, priority: CardPriority) -> Card {
        let mut card = Card::new(title.to_string(), column);
        card.priority = priority;
        card
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let board = board_with(vec![]);
        let next = reduce(&board, &CreateCard::new("Fix bug")).unwrap();
        assert!(board.cards.is_empty());
        assert_eq!(next.cards.len(), 1);
    }

    #[test]
    fn test_failed_command_yields_error() {
        let board = board_with(vec![]);
        let err = reduce(&board, &CreateCard::new("")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_card_defaults() {
        let board = board_with(vec![]);
        let command = CreateCard::new("Fix bug");
        let next = reduce(&board, &command).unwrap();

        let created = next.find_card(command.card_id).unwrap();
        assert_eq!(created.title, "Fix bug");
        assert_eq!(created.column, ColumnId::Backlog);
        assert_eq!(created.priority, CardPriority::Medium);
        assert!(created.labels.is_empty());
        assert_eq!(created.created_at, command.created_at);
    }

    #[test]
    fn test_create_card_appends_and_dedups_labels() {
        let existing = card("A", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![existing.clone()]);
        let command = CreateCard::new("B")
            .in_column(ColumnId::Todo)
            .with_labels(vec!["x".to_string(), "x".to_string()]);
        let next = reduce(&board, &command).unwrap();

        assert_eq!(next.cards[0].id, existing.id);
        assert_eq!(next.cards[1].id, command.card_id);
        assert_eq!(next.cards[1].labels, vec!["x"]);
    }

    #[test]
    fn test_create_card_rejects_existing_id() {
        let board = board_with(vec![]);
        let command = CreateCard::new("A");
        let once = reduce(&board, &command).unwrap();
        assert!(reduce(&once, &command).is_err());
    }

    #[test]
    fn test_create_card_rejects_column_not_on_board() {
        let mut board = board_with(vec![]);
        board.columns = vec![ColumnId::Backlog, ColumnId::Todo];
        let command = CreateCard::new("A").in_column(ColumnId::Done);
        assert!(reduce(&board, &command).is_err());
    }

    #[test]
    fn test_move_card_sets_column() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![a.clone()]);
        let next = reduce(
            &board,
            &MoveCard {
                card_id: a.id,
                to_column: ColumnId::Done,
            },
        )
        .unwrap();
        assert_eq!(next.find_card(a.id).unwrap().column, ColumnId::Done);
    }

    #[test]
    fn test_move_missing_card_is_noop() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![a]);
        let next = reduce(
            &board,
            &MoveCard {
                card_id: uuid::Uuid::new_v4(),
                to_column: ColumnId::Done,
            },
        )
        .unwrap();
        assert_eq!(next, board);
    }

    #[test]
    fn test_update_card_merges_fields() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![a.clone()]);
        let next = reduce(
            &board,
            &UpdateCard {
                card_id: a.id,
                changes: crate::CardUpdate {
                    description: Some("details".to_string()),
                    ..Default::default()
                },
            },
        )
        .unwrap();
        let updated = next.find_card(a.id).unwrap();
        assert_eq!(updated.description, "details");
        assert_eq!(updated.title, "A");
        assert_eq!(updated.priority, CardPriority::Low);
    }

    #[test]
    fn test_update_card_rejects_empty_title() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![a.clone()]);
        let result = reduce(
            &board,
            &UpdateCard {
                card_id: a.id,
                changes: crate::CardUpdate {
                    title: Some(String::new()),
                    ..Default::default()
                },
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_card_is_idempotent() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let b = card("B", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![a.clone(), b.clone()]);
        let delete = DeleteCard { card_id: a.id };

        let once = reduce(&board, &delete).unwrap();
        let twice = reduce(&once, &delete).unwrap();
        assert_eq!(once.cards.len(), 1);
        assert_eq!(once, twice);
        assert_eq!(twice.cards[0].id, b.id);
    }

    #[test]
    fn test_add_label_suppresses_duplicates() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let board = board_with(vec![a.clone()]);
        let add = AddLabel {
            card_id: a.id,
            label: "bug".to_string(),
        };
        let once = reduce(&board, &add).unwrap();
        let twice = reduce(&once, &add).unwrap();
        assert_eq!(twice.find_card(a.id).unwrap().labels, vec!["bug"]);
    }

    #[test]
    fn test_reorder_column_moves_column_to_end_in_given_order() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let x = card("X", ColumnId::Done, CardPriority::Low);
        let b = card("B", ColumnId::Todo, CardPriority::Critical);
        let y = card("Y", ColumnId::Backlog, CardPriority::Low);
        let c = card("C", ColumnId::Todo, CardPriority::Medium);
        let board = board_with(vec![a.clone(), x.clone(), b.clone(), y.clone(), c.clone()]);

        let next = reduce(
            &board,
            &ReorderColumn {
                column: ColumnId::Todo,
                card_ids: vec![b.id, c.id, a.id],
            },
        )
        .unwrap();

        let order: Vec<CardId> = next.cards.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![x.id, y.id, b.id, c.id, a.id]);
    }

    #[test]
    fn test_reorder_column_drops_unknown_and_keeps_omitted() {
        let a = card("A", ColumnId::Todo, CardPriority::Low);
        let b = card("B", ColumnId::Todo, CardPriority::Low);
        let c = card("C", ColumnId::Todo, CardPriority::Low);
        let other = card("O", ColumnId::Done, CardPriority::Low);
        let board = board_with(vec![a.clone(), b.clone(), c.clone(), other.clone()]);

        let next = reduce(
            &board,
            &ReorderColumn {
                column: ColumnId::Todo,
                card_ids: vec![c.id, uuid::Uuid::new_v4(), other.id, c.id],
            },
        )
        .unwrap();

        let order: Vec<CardId> = next.cards.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![other.id, c.id, a.id, b.id]);
        assert_eq!(next.find_card(other.id).unwrap().column, ColumnId::Done);
    }

    #[test]
    fn test_load_cards_replaces_collection() {
        let board = board_with(vec![card("Old", ColumnId::Todo, CardPriority::Low)]);
        let fresh = vec![
            card("A", ColumnId::Backlog, CardPriority::High),
            card("B", ColumnId::Done, CardPriority::Low),
        ];
        let next = reduce(
            &board,
            &LoadCards {
                cards: fresh.clone(),
            },
        )
        .unwrap();
        assert_eq!(next.cards, fresh);
    }

    #[test]
    fn test_load_cards_rejects_duplicate_ids() {
        let a = card("A", ColumnId::Backlog, CardPriority::High);
        let board = board_with(vec![]);
        let result = reduce(
            &board,
            &LoadCards {
                cards: vec![a.clone(), a],
            },
        );
        assert!(result.is_err());
    }
}
