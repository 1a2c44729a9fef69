use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Language;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// Where projects, snapshots and chat turns are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub autosave_delay_ms: u64,
    pub default_language: Language,
    pub storage: StorageBackend,
    pub local_db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: 120,
            autosave_delay_ms: 800,
            default_language: Language::Cpp,
            storage: StorageBackend::Remote,
            local_db_path: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("CODESENSE_SERVER_URL")
            && !url.trim().is_empty()
        {
            self.server_url = url.trim().to_string();
        }
        self
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path()).with_env_overrides()
}

/// Read a config file, falling back to defaults when it is missing or invalid.
pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring invalid config {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CODESENSE_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

pub fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CODESENSE_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("CodeSense");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("CodeSense");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("codesense");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("codesense");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".codesense")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.autosave_delay(), Duration::from_millis(800));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "server_url = \"http://analysis.local:9000\"\nstorage = \"local\"\ndefault_language = \"py\"\n",
        )
        .unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.server_url, "http://analysis.local:9000");
        assert_eq!(config.storage, StorageBackend::Local);
        assert_eq!(config.default_language, Language::Python);
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "autosave_delay_ms = \"soon\"").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            autosave_delay_ms: 250,
            local_db_path: Some(dir.path().join("store.db")),
            ..AppConfig::default()
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path), config);
    }
}
