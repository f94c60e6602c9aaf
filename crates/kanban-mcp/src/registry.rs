use crate::requests::{
    AddLabelRequest, ColumnRequest, CreateCardRequest, DeleteCardRequest, GetBoardRequest,
    MoveCardRequest, UpdateCardRequest,
};
use crate::tools::KanbanTools;
use crate::validation::{InputValidator, ValidationFailure, ROOT_FIELD};
use kanban_core::KanbanError;
use kanban_domain::BoardHandle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("board rejected the change: {0}")]
    Engine(#[from] KanbanError),
}

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    GetBoard,
    CreateCard,
    MoveCard,
    UpdateCard,
    DeleteCard,
    AddLabel,
    GetColumnSummary,
    PrioritizeColumn,
}

impl ToolName {
    /// Discovery order.
    pub const ALL: [ToolName; 8] = [
        ToolName::GetBoard,
        ToolName::CreateCard,
        ToolName::MoveCard,
        ToolName::UpdateCard,
        ToolName::DeleteCard,
        ToolName::AddLabel,
        ToolName::GetColumnSummary,
        ToolName::PrioritizeColumn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetBoard => "get_board",
            Self::CreateCard => "create_card",
            Self::MoveCard => "move_card",
            Self::UpdateCard => "update_card",
            Self::DeleteCard => "delete_card",
            Self::AddLabel => "add_label",
            Self::GetColumnSummary => "get_column_summary",
            Self::PrioritizeColumn => "prioritize_column",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::GetBoard => "Get the whole board: every column in order with its cards and card count",
            Self::CreateCard => "Create a card. Lands in the backlog with medium priority unless told otherwise",
            Self::MoveCard => "Move a card to a different column. Fails if the card is missing or already there",
            Self::UpdateCard => "Update a card's title, description, priority, or labels. Fields left out are unchanged; labels replace the existing set",
            Self::DeleteCard => "Delete a card permanently",
            Self::AddLabel => "Add a label to a card. Reports alreadyExists instead of adding a duplicate",
            Self::GetColumnSummary => "Summarize one column: card count, per-priority counts, labels in use, and card list",
            Self::PrioritizeColumn => "Sort one column by priority (critical first). Cards of equal priority keep their order",
        }
    }

    fn validator(&self) -> Result<InputValidator, String> {
        let name = self.as_str();
        match self {
            Self::GetBoard => InputValidator::for_request::<GetBoardRequest>(name),
            Self::CreateCard => InputValidator::for_request::<CreateCardRequest>(name),
            Self::MoveCard => InputValidator::for_request::<MoveCardRequest>(name),
            Self::UpdateCard => InputValidator::for_request::<UpdateCardRequest>(name),
            Self::DeleteCard => InputValidator::for_request::<DeleteCardRequest>(name),
            Self::AddLabel => InputValidator::for_request::<AddLabelRequest>(name),
            Self::GetColumnSummary | Self::PrioritizeColumn => {
                InputValidator::for_request::<ColumnRequest>(name)
            }
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

/// What an external caller needs to discover a tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

struct RegisteredTool {
    name: ToolName,
    validator: InputValidator,
}

/// All tools, callable by name with JSON arguments.
pub struct ToolRegistry {
    tools: KanbanTools,
    registered: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new(board: BoardHandle) -> Result<Self, String> {
        let registered = ToolName::ALL
            .into_iter()
            .map(|name| {
                Ok(RegisteredTool {
                    name,
                    validator: name.validator()?,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Self {
            tools: KanbanTools::new(board),
            registered,
        })
    }

    pub fn tools(&self) -> &KanbanTools {
        &self.tools
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.registered
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name.as_str(),
                description: tool.name.description(),
                input_schema: tool.validator.schema().clone(),
            })
            .collect()
    }

    /// Validate `arguments` and run the named tool. Missing arguments are
    /// treated as an empty object.
    pub fn call(&self, name: &str, arguments: Option<Value>) -> ToolResult<Value> {
        let tool_name: ToolName = name.parse()?;
        let args = arguments.unwrap_or_else(|| Value::Object(Default::default()));

        let registered = self
            .registered
            .iter()
            .find(|tool| tool.name == tool_name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        registered
            .validator
            .validate(&args)
            .map_err(ToolError::Validation)?;

        tracing::debug!("Calling tool {}", tool_name);
        let tools = &self.tools;
        match tool_name {
            ToolName::GetBoard => to_json(tools.get_board()),
            ToolName::CreateCard => to_json(tools.create_card(parse(tool_name, args)?)?),
            ToolName::MoveCard => to_json(tools.move_card(parse(tool_name, args)?)?),
            ToolName::UpdateCard => to_json(tools.update_card(parse(tool_name, args)?)?),
            ToolName::DeleteCard => to_json(tools.delete_card(parse(tool_name, args)?)?),
            ToolName::AddLabel => to_json(tools.add_label(parse(tool_name, args)?)?),
            ToolName::GetColumnSummary => {
                to_json(tools.get_column_summary(parse(tool_name, args)?))
            }
            ToolName::PrioritizeColumn => {
                to_json(tools.prioritize_column(parse(tool_name, args)?)?)
            }
        }
    }
}

fn parse<T: DeserializeOwned>(tool: ToolName, args: Value) -> ToolResult<T> {
    serde_json::from_value(args).map_err(|e| {
        ToolError::Validation(ValidationFailure::single(
            tool.as_str(),
            ROOT_FIELD,
            e.to_string(),
        ))
    })
}

fn to_json<T: Serialize>(value: T) -> ToolResult<Value> {
    serde_json::to_value(value).map_err(|e| KanbanError::Serialization(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{Board, BoardStore};
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(BoardStore::shared(Board::new())).unwrap()
    }

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
        }
        assert!(matches!(
            "archive_card".parse::<ToolName>(),
            Err(ToolError::UnknownTool(_))
        ));
    }

    #[test]
    fn test_descriptors_cover_every_tool() {
        let descriptors = registry().descriptors();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "get_board",
                "create_card",
                "move_card",
                "update_card",
                "delete_card",
                "add_label",
                "get_column_summary",
                "prioritize_column"
            ]
        );
        for descriptor in &descriptors {
            assert_eq!(descriptor.input_schema["type"], "object");
            assert!(!descriptor.description.is_empty());
        }
    }

    #[test]
    fn test_missing_arguments_mean_empty_object() {
        let value = registry().call("get_board", None).unwrap();
        assert_eq!(value["totalCards"], 0);
    }

    #[test]
    fn test_validation_runs_before_handler() {
        let registry = registry();
        let err = registry
            .call("create_card", Some(json!({ "priority": "high" })))
            .unwrap_err();
        match err {
            ToolError::Validation(failure) => assert_eq!(failure.fields(), vec!["title"]),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(registry.tools().board().live().revision(), 0);
    }

    #[test]
    fn test_unknown_tool() {
        assert!(matches!(
            registry().call("drop_table", None),
            Err(ToolError::UnknownTool(name)) if name == "drop_table"
        ));
    }
}
