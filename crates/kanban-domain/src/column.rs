use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow stage a card belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// Reference column order, left to right.
    pub const ALL: [ColumnId; 4] = [
        ColumnId::Backlog,
        ColumnId::Todo,
        ColumnId::InProgress,
        ColumnId::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| format!("unknown column '{}'", s))
    }
}

/// Display attributes of a column. Not mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub label: String,
    pub color: String,
}

impl ColumnMeta {
    pub fn new(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
        }
    }

    /// Reference labels and colors for the four workflow stages.
    pub fn reference(column: ColumnId) -> Self {
        match column {
            ColumnId::Backlog => Self::new("Backlog", "#6b7280"),
            ColumnId::Todo => Self::new("To Do", "#3b82f6"),
            ColumnId::InProgress => Self::new("In Progress", "#f59e0b"),
            ColumnId::Done => Self::new("Done", "#10b981"),
        }
    }
}

/// Direction for moving between adjacent columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

/// Column next to `current` in `columns` order, or `None` at either edge.
pub fn neighbor_column(
    columns: &[ColumnId],
    current: ColumnId,
    direction: MoveDirection,
) -> Option<ColumnId> {
    let idx = columns.iter().position(|c| *c == current)?;
    let target = match direction {
        MoveDirection::Left => idx.checked_sub(1)?,
        MoveDirection::Right => idx + 1,
    };
    columns.get(target).copied()
}
