use crate::context::CliContext;
use anyhow::Context;
use kanban_mcp::KanbanMcpServer;
use kanban_tui::App;
use rmcp::ServiceExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Runs the terminal board, optionally serving MCP clients over TCP on the same live board.
pub async fn handle(ctx: &CliContext, listen: Option<&str>) -> anyhow::Result<()> {
    let session = ctx.open_board().await.context("Failed to open board")?;

    let acceptor = match listen {
        Some(addr) => {
            let server =
                KanbanMcpServer::new(session.board().clone()).map_err(anyhow::Error::msg)?;
            Some(spawn_mcp_listener(server, addr).await?)
        }
        None => None,
    };

    let mut app = App::new(session.board().clone());
    let result = app.run().await;

    if let Some(acceptor) = acceptor {
        acceptor.abort();
    }
    session.shutdown().await.context("Failed to flush board")?;
    result.map_err(Into::into)
}

async fn spawn_mcp_listener(server: KanbanMcpServer, addr: &str) -> anyhow::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {}", addr))?;
    tracing::info!("Accepting MCP connections on {}", addr);

    Ok(tokio::spawn(async move {
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!("MCP accept failed: {}", e);
                    continue;
                }
            };
            tracing::debug!("MCP client connected from {}", peer);

            let server = server.clone();
            tokio::spawn(async move {
                match server.serve(stream).await {
                    Ok(service) => {
                        if let Err(e) = service.waiting().await {
                            tracing::warn!("MCP session with {} ended with error: {}", peer, e);
                        }
                    }
                    Err(e) => tracing::warn!("MCP handshake with {} failed: {}", peer, e),
                }
            });
        }
    }))
}
