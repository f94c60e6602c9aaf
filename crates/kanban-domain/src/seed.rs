//! Example cards used when no saved board exists or the saved one is unusable.

use crate::{Card, CardPriority, ColumnId};

fn seed_card(
    title: &str,
    description: &str,
    column: ColumnId,
    priority: CardPriority,
    labels: &[&str],
) -> Card {
    let mut card = Card::new(title.to_string(), column);
    card.description = description.to_string();
    card.priority = priority;
    card.labels = labels.iter().map(|l| l.to_string()).collect();
    card
}

/// Fresh ids on every call.
pub fn seed_cards() -> Vec<Card> {
    vec![
        seed_card(
            "Design tool schemas",
            "Describe every board operation so agents can discover it.",
            ColumnId::Done,
            CardPriority::High,
            &["agents", "api"],
        ),
        seed_card(
            "Expose board state to agents",
            "Register the read and write tools against the live board.",
            ColumnId::InProgress,
            CardPriority::Critical,
            &["agents"],
        ),
        seed_card(
            "Keyboard drag and drop",
            "Grab a card, carry it across columns, drop it.",
            ColumnId::InProgress,
            CardPriority::Medium,
            &["ui"],
        ),
        seed_card(
            "Persist board between runs",
            "Mirror every change to the board file.",
            ColumnId::Todo,
            CardPriority::High,
            &["storage"],
        ),
        seed_card(
            "Column summaries",
            "Per-priority counts and label overview for a column.",
            ColumnId::Todo,
            CardPriority::Low,
            &["agents", "api"],
        ),
        seed_card(
            "Write user guide",
            "",
            ColumnId::Backlog,
            CardPriority::Low,
            &["docs"],
        ),
    ]
}
