mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else if cli.command.is_some() {
        // The board UI owns the terminal, so only subcommands log to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    match cli.command {
        None => {
            let ctx = CliContext::load(cli.file.as_deref());
            let listen = ctx.mcp_listen(cli.listen.as_deref()).map(str::to_string);
            handlers::board::handle(&ctx, listen.as_deref()).await?;
        }
        Some(Commands::Tools) => handlers::tools::handle_list()?,
        Some(Commands::Call { tool, args }) => {
            let ctx = CliContext::load(cli.file.as_deref());
            handlers::tools::handle_call(&ctx, &tool, args.as_deref()).await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "kanban", &mut std::io::stdout());
        }
    }

    Ok(())
}
