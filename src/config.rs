use crate::model::Selection;
use crate::services::ecourts::DEFAULT_BASE_URL;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the eCourts services site
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Where JSON exports and saved PDFs go
    pub export_dir: Option<String>,
    /// Court chosen in the previous session
    pub last_selection: Selection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: None,
            last_selection: Selection::default(),
        }
    }
}

/// Values taken from the environment for this run only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("CAUSELIST_BASE_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            request_timeout_secs: env::var("CAUSELIST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0),
        }
    }

    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
    }
}

/// The config file as read at startup next to the values in effect
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// File contents to write back on exit. `None` when an existing file
    /// could not be parsed; that file is left alone.
    pub stored: Option<Config>,
    /// File contents with environment overrides applied
    pub active: Config,
}

impl LoadedConfig {
    /// No file and no overrides
    pub fn new(config: Config) -> Self {
        Self {
            stored: Some(config.clone()),
            active: config,
        }
    }

    /// Combine a file read (see `Config::load_from`) with overrides
    pub fn from_parts(file: anyhow::Result<Option<Config>>, overrides: &EnvOverrides) -> Self {
        let stored = match file {
            Ok(config) => Some(config.unwrap_or_default()),
            Err(e) => {
                warn!(error = ?e, "Ignoring unreadable config; it will not be overwritten");
                None
            }
        };
        let mut active = stored.clone().unwrap_or_default();
        overrides.apply(&mut active);
        Self { stored, active }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".causelist-tui"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Read a config file; `Ok(None)` when there is none
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Saved config (or defaults) plus environment overrides
    pub fn load_or_default() -> LoadedConfig {
        let file = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        };
        LoadedConfig::from_parts(file, &EnvOverrides::from_env())
    }

    /// Directory for exports: configured, else the OS download folder
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = self.export_dir.as_deref().filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::download_dir()
            .or_else(|| Self::config_dir().map(|d| d.join("downloads")))
            .unwrap_or_else(|| PathBuf::from("downloads"))
    }

    pub fn log_dir() -> PathBuf {
        Self::config_dir()
            .map(|d| d.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"export_dir": "/tmp/lists"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/lists"));
        assert_eq!(config.last_selection, Selection::default());
    }

    #[test]
    fn test_last_selection_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.last_selection.state = Some("7".to_string());
        config.last_selection.district = Some("12".to_string());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.last_selection, config.last_selection);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from(&dir.path().join("config.json")).unwrap().is_none());
    }

    #[test]
    fn test_overrides_change_active_config_only() {
        let file = Config {
            base_url: "https://mirror.example/v6".to_string(),
            export_dir: Some("/data/lists".to_string()),
            ..Config::default()
        };
        let overrides = EnvOverrides {
            base_url: Some("http://one-off.test".to_string()),
            request_timeout_secs: Some(5),
        };
        let loaded = LoadedConfig::from_parts(Ok(Some(file.clone())), &overrides);

        assert_eq!(loaded.active.base_url, "http://one-off.test");
        assert_eq!(loaded.active.request_timeout_secs, 5);
        assert_eq!(loaded.active.export_dir.as_deref(), Some("/data/lists"));
        assert_eq!(loaded.stored, Some(file));
    }

    #[test]
    fn test_unparseable_file_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"base_url":"https://mirror.example/v6","export_dir":"/data/lists",}"#,
        )
        .unwrap();

        let file = Config::load_from(&path);
        assert!(file.is_err());

        let loaded = LoadedConfig::from_parts(file, &EnvOverrides::default());
        assert!(loaded.stored.is_none());
        assert_eq!(loaded.active, Config::default());
    }

    #[test]
    fn test_empty_export_dir_uses_fallback() {
        let config = Config {
            export_dir: Some(String::new()),
            ..Config::default()
        };
        assert_ne!(config.export_dir(), PathBuf::from(""));
    }
}
