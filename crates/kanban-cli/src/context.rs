use kanban_core::{AppConfig, KanbanResult};
use kanban_persistence::{CardStorage, JsonFileStore, PersistentBoard};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the board lives, resolved from the command line and config file.
pub struct CliContext {
    pub config: AppConfig,
    pub data_file: PathBuf,
}

impl CliContext {
    pub fn load(file: Option<&str>) -> Self {
        let config = AppConfig::load();
        let data_file = config.effective_data_file(file);
        Self { config, data_file }
    }

    pub fn storage(&self) -> CardStorage {
        CardStorage::new(
            Arc::new(JsonFileStore::new(&self.data_file)),
            self.config.effective_storage_key(),
        )
    }

    pub async fn open_board(&self) -> KanbanResult<PersistentBoard> {
        tracing::info!("Opening board file: {}", self.data_file.display());
        PersistentBoard::open(self.storage()).await
    }

    /// `--listen` wins over the config file.
    pub fn mcp_listen<'a>(&'a self, cli_choice: Option<&'a str>) -> Option<&'a str> {
        cli_choice.or(self.config.mcp_listen.as_deref())
    }
}
