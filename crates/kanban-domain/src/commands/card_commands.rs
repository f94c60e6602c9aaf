use super::{Command, CommandContext};
use crate::card::dedup_labels;
use crate::{Card, CardId, CardPriority, CardUpdate, ColumnId};
use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use uuid::Uuid;

/// Create a new card at the end of the collection.
///
/// The id and timestamp are fixed when the command is built, so the caller
/// knows the new card's id before dispatching and replaying the command
/// against the same board yields the same result.
#[derive(Debug, Clone)]
pub struct CreateCard {
    pub card_id: CardId,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub priority: CardPriority,
    pub labels: Vec<String>,
    /// Defaults to the board's first column
    pub column: Option<ColumnId>,
}

impl CreateCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            card_id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.into(),
            description: String::new(),
            priority: CardPriority::default(),
            labels: Vec::new(),
            column: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: CardPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn in_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }
}

impl Command for CreateCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        if self.title.is_empty() {
            return Err(KanbanError::validation("card title must not be empty"));
        }
        let column = self.column.unwrap_or_else(|| context.default_column());
        context.ensure_column(column)?;
        if context.cards.iter().any(|c| c.id == self.card_id) {
            return Err(KanbanError::Validation(format!(
                "card id {} already exists",
                self.card_id
            )));
        }

        context.cards.push(Card {
            id: self.card_id,
            title: self.title.clone(),
            description: self.description.clone(),
            column,
            priority: self.priority,
            labels: dedup_labels(self.labels.clone()),
            created_at: self.created_at,
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create card: '{}'", self.title)
    }
}

/// Move card to a different column. Position in the collection is unchanged.
#[derive(Debug, Clone)]
pub struct MoveCard {
    pub card_id: CardId,
    pub to_column: ColumnId,
}

impl Command for MoveCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        context.ensure_column(self.to_column)?;
        if let Some(card) = context.card_mut(self.card_id) {
            card.column = self.to_column;
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move card {} to column {}", self.card_id, self.to_column)
    }
}

/// Update card properties (title, description, priority, labels)
#[derive(Debug, Clone)]
pub struct UpdateCard {
    pub card_id: CardId,
    pub changes: CardUpdate,
}

impl Command for UpdateCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        if self.changes.title.as_deref() == Some("") {
            return Err(KanbanError::validation("card title must not be empty"));
        }
        if let Some(card) = context.card_mut(self.card_id) {
            card.apply(self.changes.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Update card {} ({})",
            self.card_id,
            self.changes.updated_fields().join(", ")
        )
    }
}

/// Remove a card. Absent ids are ignored.
#[derive(Debug, Clone)]
pub struct DeleteCard {
    pub card_id: CardId,
}

impl Command for DeleteCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        context.cards.retain(|c| c.id != self.card_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete card {}", self.card_id)
    }
}

/// Append a label unless the card already carries it
#[derive(Debug, Clone)]
pub struct AddLabel {
    pub card_id: CardId,
    pub label: String,
}

impl Command for AddLabel {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        if self.label.is_empty() {
            return Err(KanbanError::validation("label must not be empty"));
        }
        if let Some(card) = context.card_mut(self.card_id) {
            card.add_label(self.label.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add label '{}' to card {}", self.label, self.card_id)
    }
}
