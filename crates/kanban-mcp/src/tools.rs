//! The eight board tools.
//!
//! Each handler reads the live board when it is invoked. Handlers that check
//! the board before changing it do both inside one `transact`, so the check
//! still holds when the command commits. Lookups that fail and redundant requests come back as
//! structured results, not errors.

use crate::requests::{
    AddLabelRequest, ColumnRequest, CreateCardRequest, DeleteCardRequest, MoveCardRequest,
    UpdateCardRequest,
};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::query::{board_view, column_summary};
use kanban_domain::sort::prioritized_ids;
use kanban_domain::{
    AddLabel, BoardHandle, BoardView, Card, CardBrief, CardId, CardUpdate, ColumnId,
    ColumnSummary, CreateCard, DeleteCard, MoveCard, ReorderColumn, UpdateCard,
};
use serde::Serialize;

/// Either the tool's success payload or `{ "success": false, "error": ... }`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Done(T),
    Failed(Failure),
}

impl<T> Outcome<T> {
    pub fn failed(error: impl Into<String>) -> Self {
        Outcome::Failed(Failure {
            success: false,
            error: error.into(),
        })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCardResult {
    pub success: bool,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardResult {
    pub success: bool,
    pub card_id: CardId,
    pub from_column: ColumnId,
    pub to_column: ColumnId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardResult {
    pub success: bool,
    pub card_id: CardId,
    pub updated_fields: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedCard {
    pub id: CardId,
    pub title: String,
    pub column: ColumnId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCardResult {
    pub success: bool,
    pub deleted_card: DeletedCard,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelResult {
    pub success: bool,
    pub card_id: CardId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_label_count: Option<usize>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub already_exists: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizeResult {
    pub success: bool,
    pub column: ColumnId,
    pub new_order: Vec<CardBrief>,
}

fn not_found(card_id: &str) -> String {
    format!("Card '{}' not found", card_id)
}

/// Tool handlers over a shared board.
#[derive(Clone)]
pub struct KanbanTools {
    board: BoardHandle,
}

impl KanbanTools {
    pub fn new(board: BoardHandle) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &BoardHandle {
        &self.board
    }

    pub fn get_board(&self) -> BoardView {
        board_view(&self.board.live().current())
    }

    pub fn create_card(&self, req: CreateCardRequest) -> KanbanResult<CreateCardResult> {
        let mut command = CreateCard::new(req.title)
            .with_description(req.description.unwrap_or_default())
            .with_priority(req.priority)
            .with_labels(req.labels.unwrap_or_default());
        if let Some(column) = req.column {
            command = command.in_column(column);
        }

        let board = self.board.dispatch(&command)?;
        let card = board.find_card(command.card_id).cloned().ok_or_else(|| {
            KanbanError::Internal(format!("created card {} missing", command.card_id))
        })?;
        Ok(CreateCardResult {
            success: true,
            card,
        })
    }

    pub fn move_card(&self, req: MoveCardRequest) -> KanbanResult<Outcome<MoveCardResult>> {
        let (_, outcome) = self.board.transact(|board| {
            let Some(card) = board.find_card_str(&req.card_id) else {
                return (None, Outcome::failed(not_found(&req.card_id)));
            };
            if card.column == req.to_column {
                let message = format!(
                    "Card '{}' is already in column '{}'",
                    card.id, req.to_column
                );
                return (None, Outcome::failed(message));
            }

            let command = MoveCard {
                card_id: card.id,
                to_column: req.to_column,
            };
            let result = MoveCardResult {
                success: true,
                card_id: card.id,
                from_column: card.column,
                to_column: req.to_column,
            };
            (Some(command), Outcome::Done(result))
        })?;
        Ok(outcome)
    }

    pub fn update_card(&self, req: UpdateCardRequest) -> KanbanResult<Outcome<UpdateCardResult>> {
        let (_, outcome) = self.board.transact(|board| {
            let Some(card) = board.find_card_str(&req.card_id) else {
                return (None, Outcome::failed(not_found(&req.card_id)));
            };

            let changes = CardUpdate {
                title: req.title,
                description: req.description,
                priority: req.priority,
                labels: req.labels,
            };
            let result = UpdateCardResult {
                success: true,
                card_id: card.id,
                updated_fields: changes.updated_fields(),
            };
            let command = UpdateCard {
                card_id: card.id,
                changes,
            };
            (Some(command), Outcome::Done(result))
        })?;
        Ok(outcome)
    }

    pub fn delete_card(&self, req: DeleteCardRequest) -> KanbanResult<Outcome<DeleteCardResult>> {
        let (_, outcome) = self.board.transact(|board| {
            let Some(card) = board.find_card_str(&req.card_id) else {
                return (None, Outcome::failed(not_found(&req.card_id)));
            };

            let result = DeleteCardResult {
                success: true,
                deleted_card: DeletedCard {
                    id: card.id,
                    title: card.title.clone(),
                    column: card.column,
                },
            };
            (Some(DeleteCard { card_id: card.id }), Outcome::Done(result))
        })?;
        Ok(outcome)
    }

    pub fn add_label(&self, req: AddLabelRequest) -> KanbanResult<Outcome<AddLabelResult>> {
        let label = req.label;
        let (board, mut outcome) = self.board.transact(|board| {
            let Some(card) = board.find_card_str(&req.card_id) else {
                return (None, Outcome::failed(not_found(&req.card_id)));
            };

            let already_exists = card.has_label(&label);
            let result = AddLabelResult {
                success: true,
                card_id: card.id,
                label: label.clone(),
                new_label_count: None,
                already_exists,
            };
            let command = (!already_exists).then(|| AddLabel {
                card_id: card.id,
                label: label.clone(),
            });
            (command, Outcome::Done(result))
        })?;

        if let Outcome::Done(result) = &mut outcome {
            if !result.already_exists {
                result.new_label_count = board.find_card(result.card_id).map(|c| c.labels.len());
            }
        }
        Ok(outcome)
    }

    pub fn get_column_summary(&self, req: ColumnRequest) -> ColumnSummary {
        column_summary(&self.board.live().current(), req.column)
    }

    pub fn prioritize_column(&self, req: ColumnRequest) -> KanbanResult<PrioritizeResult> {
        let (board, ()) = self.board.transact(|board| {
            let command = ReorderColumn {
                column: req.column,
                card_ids: prioritized_ids(board, req.column),
            };
            (Some(command), ())
        })?;
        let new_order = board.cards_in(req.column).map(CardBrief::from).collect();
        Ok(PrioritizeResult {
            success: true,
            column: req.column,
            new_order,
        })
    }
}
