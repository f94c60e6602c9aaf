use super::{Command, CommandContext};
use crate::{Card, CardId, ColumnId};
use kanban_core::KanbanResult;

/// Rewrite the display order of one column.
///
/// The collection is rebuilt as every card outside `column` in its existing
/// order, followed by the column's cards in `card_ids` order. Ids that are
/// unknown or belong to another column are skipped, repeats count once, and
/// column cards missing from `card_ids` follow the listed ones in their
/// previous relative order.
#[derive(Debug, Clone)]
pub struct ReorderColumn {
    pub column: ColumnId,
    pub card_ids: Vec<CardId>,
}

impl Command for ReorderColumn {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        context.ensure_column(self.column)?;

        let (in_column, mut others): (Vec<Card>, Vec<Card>) = std::mem::take(context.cards)
            .into_iter()
            .partition(|c| c.column == self.column);

        let mut remaining: Vec<Option<Card>> = in_column.into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        for id in &self.card_ids {
            if let Some(slot) = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|c| c.id == *id))
            {
                ordered.extend(slot.take());
            }
        }
        ordered.extend(remaining.into_iter().flatten());

        others.extend(ordered);
        *context.cards = others;
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Reorder column {} ({} cards)",
            self.column,
            self.card_ids.len()
        )
    }
}
