use crate::context::CliContext;
use crate::output::{output_error, output_success};
use anyhow::Context;
use kanban_domain::{Board, BoardStore};
use kanban_mcp::ToolRegistry;
use serde_json::Value;

/// Tool discovery does not need the board file, so an empty board backs it.
pub fn handle_list() -> anyhow::Result<()> {
    let registry =
        ToolRegistry::new(BoardStore::shared(Board::new())).map_err(anyhow::Error::msg)?;
    output_success(registry.descriptors())
}

pub async fn handle_call(ctx: &CliContext, tool: &str, args: Option<&str>) -> anyhow::Result<()> {
    let arguments = match args {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => Some(value),
            Err(e) => output_error(&format!("Arguments are not valid JSON: {}", e)),
        },
        None => None,
    };

    let session = ctx.open_board().await.context("Failed to open board")?;
    let registry = ToolRegistry::new(session.board().clone()).map_err(anyhow::Error::msg)?;
    let result = registry.call(tool, arguments);

    // Saves must land before the process exits, including on the failure paths below
    session.shutdown().await.context("Failed to flush board")?;

    match result {
        Ok(value) if value.get("success") == Some(&Value::Bool(false)) => {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("tool reported failure");
            output_error(message)
        }
        Ok(value) => output_success(value),
        Err(e) => output_error(&e.to_string()),
    }
}
