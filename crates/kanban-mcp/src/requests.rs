// ============================================================================
// Request Types (one per tool; the JSON Schemas are generated from these)
// ============================================================================

use kanban_domain::{CardPriority, ColumnId};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetBoardRequest {}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    #[schemars(description = "Title of the card", length(min = 1))]
    pub title: String,
    #[schemars(description = "Longer description of the work (optional)")]
    pub description: Option<String>,
    #[serde(default)]
    #[schemars(description = "Priority: 'critical', 'high', 'medium', or 'low' (defaults to medium)")]
    pub priority: CardPriority,
    #[schemars(description = "Free-text labels; repeats are dropped (optional)")]
    pub labels: Option<Vec<String>>,
    #[schemars(
        description = "Column to create the card in: 'backlog', 'todo', 'in-progress', or 'done' (defaults to backlog)"
    )]
    pub column: Option<ColumnId>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    #[schemars(description = "ID of the card to move")]
    pub card_id: String,
    #[schemars(description = "Destination column: 'backlog', 'todo', 'in-progress', or 'done'")]
    pub to_column: ColumnId,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    #[schemars(description = "ID of the card to update")]
    pub card_id: String,
    #[schemars(description = "New title (optional)", length(min = 1))]
    pub title: Option<String>,
    #[schemars(description = "New description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "New priority: 'critical', 'high', 'medium', or 'low' (optional)")]
    pub priority: Option<CardPriority>,
    #[schemars(description = "Replacement label set; replaces all existing labels (optional)")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCardRequest {
    #[schemars(description = "ID of the card to delete")]
    pub card_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelRequest {
    #[schemars(description = "ID of the card to label")]
    pub card_id: String,
    #[schemars(description = "Label to add; ignored if the card already has it", length(min = 1))]
    pub label: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ColumnRequest {
    #[schemars(description = "Column: 'backlog', 'todo', 'in-progress', or 'done'")]
    pub column: ColumnId,
}
