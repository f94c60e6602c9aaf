use clap::{Parser, Subcommand};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A terminal kanban board that agents can work on too", long_about = None)]
#[command(version = VERSION, arg_required_else_help = false)]
pub struct Cli {
    /// Path to the board file (or set KANBAN_FILE env var)
    #[arg(short, long, value_name = "FILE", env = "KANBAN_FILE", global = true)]
    pub file: Option<String>,

    /// Also accept MCP connections on this address while the board is open
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the name, description, and input schema of every tool
    Tools,
    /// Invoke one tool against the board file
    Call {
        /// Tool name, e.g. create_card
        tool: String,
        /// Arguments as a JSON object (defaults to {})
        args: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
