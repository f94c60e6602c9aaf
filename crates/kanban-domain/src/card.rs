use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::column::ColumnId;

pub type CardId = Uuid;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CardPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl CardPriority {
    pub const ALL: [CardPriority; 4] = [
        CardPriority::Critical,
        CardPriority::High,
        CardPriority::Medium,
        CardPriority::Low,
    ];

    /// Sort rank, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Next value in picker order, wrapping around.
    pub fn cycle(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub column: ColumnId,
    #[serde(default)]
    pub priority: CardPriority,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(title: String, column: ColumnId) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: String::new(),
            column,
            priority: CardPriority::Medium,
            labels: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Returns false when the label was already present.
    pub fn add_label(&mut self, label: String) -> bool {
        if self.has_label(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = dedup_labels(labels);
    }

    /// Shallow-merge the supplied fields, leaving the rest untouched.
    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(labels) = update.labels {
            self.set_labels(labels);
        }
    }
}

/// Drop repeated labels, keeping the first occurrence. Matching is case-sensitive.
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(&label) {
            unique.push(label);
        }
    }
    unique
}

/// Partial card update. `None` means "leave as is"; `labels` replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<CardPriority>,
    pub labels: Option<Vec<String>>,
}

impl CardUpdate {
    /// Wire names of the fields this update touches.
    pub fn updated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.priority.is_some() {
            fields.push("priority");
        }
        if self.labels.is_some() {
            fields.push("labels");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new("Fix bug".to_string(), ColumnId::Backlog);
        assert_eq!(card.priority, CardPriority::Medium);
        assert!(card.labels.is_empty());
        assert!(card.description.is_empty());
        assert_ne!(card.id, Card::new("Fix bug".to_string(), ColumnId::Backlog).id);
    }

    #[test]
    fn test_priority_rank_order() {
        let ranks: Vec<u8> = CardPriority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert_eq!(CardPriority::Low.cycle(), CardPriority::Critical);
        assert_eq!(CardPriority::Critical.cycle(), CardPriority::High);
    }

    #[test]
    fn test_add_label_is_idempotent() {
        let mut card = Card::new("Card".to_string(), ColumnId::Todo);
        assert!(card.add_label("bug".to_string()));
        assert!(!card.add_label("bug".to_string()));
        assert!(card.add_label("Bug".to_string()));
        assert_eq!(card.labels, vec!["bug", "Bug"]);
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut card = Card::new("Card".to_string(), ColumnId::Todo);
        card.description = "keep me".to_string();
        card.labels = vec!["ui".to_string()];
        let before = card.clone();

        card.apply(CardUpdate {
            priority: Some(CardPriority::Critical),
            ..Default::default()
        });

        assert_eq!(card.priority, CardPriority::Critical);
        assert_eq!(card.title, before.title);
        assert_eq!(card.description, before.description);
        assert_eq!(card.labels, before.labels);
        assert_eq!(card.column, before.column);
        assert_eq!(card.created_at, before.created_at);
    }

    #[test]
    fn test_apply_replaces_labels_without_duplicates() {
        let mut card = Card::new("Card".to_string(), ColumnId::Todo);
        card.labels = vec!["old".to_string()];
        card.apply(CardUpdate {
            labels: Some(vec!["a".to_string(), "b".to_string(), "a".to_string()]),
            ..Default::default()
        });
        assert_eq!(card.labels, vec!["a", "b"]);
    }

    #[test]
    fn test_updated_fields() {
        let update = CardUpdate {
            title: Some("t".to_string()),
            labels: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(update.updated_fields(), vec!["title", "labels"]);
        assert!(CardUpdate::default().updated_fields().is_empty());
    }

    #[test]
    fn test_card_wire_format() {
        let card = Card::new("Card".to_string(), ColumnId::InProgress);
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["column"], "in-progress");
        assert_eq!(value["priority"], "medium");
        assert!(value.get("createdAt").is_some());

        let minimal = serde_json::json!({
            "id": card.id,
            "title": "Card",
            "column": "todo",
            "createdAt": card.created_at,
        });
        let parsed: Card = serde_json::from_value(minimal).unwrap();
        assert_eq!(parsed.priority, CardPriority::Medium);
        assert!(parsed.labels.is_empty());
        assert_eq!(parsed.description, "");
    }
}
