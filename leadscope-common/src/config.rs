//! Configuration file loading and default path resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of the optional `leadscope.toml` configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Gemini API key (lowest-priority source, see leadscope-ingest config)
    pub gemini_api_key: Option<String>,
    /// Override for the SQLite database location
    pub database_path: Option<PathBuf>,
}

/// Platform configuration file path: `<config dir>/leadscope/leadscope.toml`
pub fn config_file_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("leadscope").join("leadscope.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Load the TOML config file, returning defaults when the file is absent
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = config_file_path()?;
    load_toml_config_from(&path)
}

/// Load a TOML config from an explicit path (absent file yields defaults)
pub fn load_toml_config_from(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file found, using defaults");
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a TOML config, creating parent directories as needed
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Default database location: `<data dir>/leadscope/leads.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("leadscope")
        .join("leads.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_toml_config_from(&dir.path().join("nope.toml")).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(config.database_path.is_none());
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("leadscope.toml");

        let config = TomlConfig {
            gemini_api_key: Some("test-key".to_string()),
            database_path: Some(PathBuf::from("/tmp/leads.db")),
        };
        write_toml_config(&config, &path).unwrap();

        let loaded = load_toml_config_from(&path).unwrap();
        assert_eq!(loaded.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.database_path, Some(PathBuf::from("/tmp/leads.db")));
    }

    #[test]
    fn rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leadscope.toml");
        std::fs::write(&path, "gemini_api_key = [not toml").unwrap();

        assert!(load_toml_config_from(&path).is_err());
    }
}
