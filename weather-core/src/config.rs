use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Default endpoint root for WeatherAPI.com.
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Settings for the WeatherAPI.com provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Overrides [`DEFAULT_BASE_URL`]; mostly useful for proxies and tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl WeatherApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns the API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weatherapi]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weatherapi: WeatherApiConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the stored API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.weatherapi.api_key = Some(api_key);
    }

    /// Store a key typed by the user; blank input keeps the current key.
    ///
    /// Returns `true` if the stored key changed.
    pub fn update_api_key(&mut self, input: &str) -> bool {
        let key = input.trim();
        if key.is_empty() {
            return false;
        }

        self.set_api_key(key.to_string());
        true
    }

    /// A key passed on the command line or via environment wins over the stored one.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.weatherapi.api_key = Some(key);
        }
        self
    }

    pub fn is_configured(&self) -> bool {
        self.weatherapi.api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_not_configured() {
        let cfg = Config::default();

        assert!(!cfg.is_configured());
        assert_eq!(cfg.weatherapi.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert!(!cfg.is_configured());
        assert_eq!(cfg.weatherapi.api_key(), None);
    }

    #[test]
    fn blank_update_keeps_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("K".into());

        assert!(!cfg.update_api_key(""));
        assert!(!cfg.update_api_key("   "));
        assert_eq!(cfg.weatherapi.api_key(), Some("K"));
        assert!(cfg.is_configured());

        let saved: Config = toml::from_str(&toml::to_string_pretty(&cfg).unwrap()).unwrap();
        assert_eq!(saved.weatherapi.api_key(), Some("K"));
    }

    #[test]
    fn update_trims_and_replaces_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("OLD".into());

        assert!(cfg.update_api_key("  NEW \n"));
        assert_eq!(cfg.weatherapi.api_key.as_deref(), Some("NEW"));
    }

    #[test]
    fn override_replaces_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let cfg = cfg.with_api_key_override(Some("FROM_ENV".into()));
        assert_eq!(cfg.weatherapi.api_key(), Some("FROM_ENV"));

        let cfg = cfg.with_api_key_override(None);
        assert_eq!(cfg.weatherapi.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn parses_toml_with_and_without_base_url() {
        let cfg: Config = toml::from_str("[weatherapi]\napi_key = \"KEY\"\n").unwrap();
        assert_eq!(cfg.weatherapi.api_key(), Some("KEY"));
        assert_eq!(cfg.weatherapi.base_url(), DEFAULT_BASE_URL);

        let cfg: Config =
            toml::from_str("[weatherapi]\napi_key = \"KEY\"\nbase_url = \"http://localhost:9\"\n")
                .unwrap();
        assert_eq!(cfg.weatherapi.base_url(), "http://localhost:9");

        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_from_temp_path() {
        let dir = std::env::temp_dir().join(format!("weather-lookup-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SAVED".into());
        cfg.save_to(&path).expect("save should create parent dirs");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let path = std::env::temp_dir().join("weather-lookup-does-not-exist").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
