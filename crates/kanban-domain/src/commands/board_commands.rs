use super::{Command, CommandContext};
use crate::{Board, Card};
use kanban_core::KanbanResult;

/// Replace the whole card collection. Used once, when hydrating at startup.
#[derive(Debug, Clone)]
pub struct LoadCards {
    pub cards: Vec<Card>,
}

impl Command for LoadCards {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        Board::validate_cards(context.columns, &self.cards)?;
        *context.cards = self
            .cards
            .iter()
            .cloned()
            .map(|mut card| {
                let labels = std::mem::take(&mut card.labels);
                card.set_labels(labels);
                card
            })
            .collect();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Load {} cards", self.cards.len())
    }
}
