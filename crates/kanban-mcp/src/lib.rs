pub mod registry;
pub mod requests;
pub mod tools;
pub mod validation;

pub use registry::{ToolDescriptor, ToolError, ToolName, ToolRegistry, ToolResult};
pub use tools::{KanbanTools, Outcome};
pub use validation::{FieldIssue, InputValidator, ValidationFailure};

use kanban_domain::BoardHandle;
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        JsonObject, ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
        ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use std::sync::Arc;

/// MCP front end for the board tools. Cheap to clone; every clone drives the
/// same board.
///
/// Tools are listed and dispatched through [`ToolRegistry`] rather than rmcp's
/// `#[tool_router]` macros: arguments are checked against the compiled JSON
/// Schema first, so a bad call reports every offending field by name instead
/// of a single deserialization error.
#[derive(Clone)]
pub struct KanbanMcpServer {
    registry: Arc<ToolRegistry>,
}

impl KanbanMcpServer {
    pub fn new(board: BoardHandle) -> Result<Self, String> {
        Ok(Self {
            registry: Arc::new(ToolRegistry::new(board)?),
        })
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    fn mcp_tools(&self) -> Vec<Tool> {
        self.registry
            .descriptors()
            .into_iter()
            .map(|descriptor| {
                let schema: JsonObject = match descriptor.input_schema {
                    serde_json::Value::Object(map) => map,
                    _ => JsonObject::new(),
                };
                Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
            })
            .collect()
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Validation(failure) => {
                let message = failure.to_string();
                McpError::invalid_params(message, serde_json::to_value(&failure).ok())
            }
            ToolError::UnknownTool(_) => McpError::invalid_params(err.to_string(), None),
            ToolError::Engine(_) => McpError::internal_error(err.to_string(), None),
        }
    }
}

impl ServerHandler for KanbanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Kanban MCP Server - Read and change the shared kanban board. \
                 Changes appear immediately in the board UI. Use get_board to learn card ids."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.mcp_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.map(serde_json::Value::Object);
        let result = self.registry.call(&request.name, arguments)?;
        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
