use anyhow::{Context, Result};
use kanban_core::AppConfig;
use kanban_mcp::KanbanMcpServer;
use kanban_persistence::{CardStorage, JsonFileStore, PersistentBoard};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_args(config: &AppConfig) -> PathBuf {
    let arg = std::env::args().nth(1);
    config.effective_data_file(arg.as_deref())
}

fn validate_path(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    if path.is_absolute() {
        // Absolute paths are the user's explicit choice
        Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
    } else {
        // Relative paths must stay inside cwd
        let resolved = cwd.join(path);
        let canonical = resolved.canonicalize().unwrap_or(resolved);

        if !canonical.starts_with(&cwd) {
            anyhow::bail!(
                "Path traversal not allowed: '{}' resolves outside current directory",
                path.display()
            );
        }
        Ok(canonical)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load();
    let data_file = validate_path(&parse_args(&config))?;

    tracing::info!(
        "Starting Kanban MCP server with data file: {}",
        data_file.display()
    );

    let storage = CardStorage::new(
        Arc::new(JsonFileStore::new(&data_file)),
        config.effective_storage_key(),
    );
    let session = PersistentBoard::open(storage)
        .await
        .context("Failed to open board")?;

    let server = KanbanMcpServer::new(session.board().clone()).map_err(anyhow::Error::msg)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Kanban MCP server started successfully");

    service.waiting().await?;

    session.shutdown().await.context("Failed to flush board")?;
    Ok(())
}
