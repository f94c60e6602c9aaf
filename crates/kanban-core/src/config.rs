use crate::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key under which the card collection is stored when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "kanban-cards";

/// Board file used when neither the command line nor the config names one.
pub const DEFAULT_DATA_FILE: &str = "kanban.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board file backing the key-value store
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Key the card collection is stored under inside the board file
    #[serde(default)]
    pub storage_key: Option<String>,
    /// Address the UI binary accepts MCP connections on, e.g. `127.0.0.1:7878`
    #[serde(default)]
    pub mcp_listen: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when it is missing or malformed.
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> KanbanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| KanbanError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn effective_storage_key(&self) -> &str {
        self.storage_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(DEFAULT_STORAGE_KEY)
    }

    /// Command-line choice wins over the config file, which wins over the default.
    pub fn effective_data_file(&self, cli_choice: Option<&str>) -> PathBuf {
        match cli_choice {
            Some(path) => PathBuf::from(path),
            None => self
                .data_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_storage_key(), DEFAULT_STORAGE_KEY);
        assert_eq!(
            config.effective_data_file(None),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }

    #[test]
    fn test_cli_choice_overrides_config() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("/tmp/from-config.json")),
            ..Default::default()
        };
        assert_eq!(
            config.effective_data_file(Some("board.json")),
            PathBuf::from("board.json")
        );
        assert_eq!(
            config.effective_data_file(None),
            PathBuf::from("/tmp/from-config.json")
        );
    }

    #[test]
    fn test_empty_storage_key_falls_back() {
        let config = AppConfig {
            storage_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.effective_storage_key(), DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "data_file = \"team.json\"\nstorage_key = \"team-cards\"\nmcp_listen = \"127.0.0.1:7878\""
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("team.json")));
        assert_eq!(config.effective_storage_key(), "team-cards");
        assert_eq!(config.mcp_listen.as_deref(), Some("127.0.0.1:7878"));
    }

    #[test]
    fn test_load_from_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_file = [").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, KanbanError::Config(_)));
    }
}
