use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::openweather::DEFAULT_BASE_URL;

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Location used when none is given and none is configured.
pub const DEFAULT_LOCATION: &str = "SaiGon";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_location = "Hanoi"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the OpenWeather endpoint, mostly useful for testing.
    pub base_url: Option<String>,

    pub default_location: Option<String>,

    /// Client-side request timeout; unset means the transport default.
    pub timeout_secs: Option<u64>,

    /// Key picked up from [`API_KEY_ENV`]; never written back to disk.
    #[serde(skip)]
    pub env_api_key: Option<String>,
}

impl Config {
    /// Load config from disk (or an empty default on first run) and pick up
    /// the API key from the environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.env_api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        Ok(cfg)
    }

    /// Load config from an explicit path; a missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
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

    pub fn save_to(&self, path: &Path) -> Result<()> {
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
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key to use: environment first, then the config file.
    pub fn api_key(&self) -> Option<String> {
        non_blank(self.env_api_key.as_deref())
            .or_else(|| non_blank(self.api_key.as_deref()))
            .map(str::to_owned)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn default_location(&self) -> &str {
        non_blank(self.default_location.as_deref()).unwrap_or(DEFAULT_LOCATION)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("weather-widget-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.default_location(), DEFAULT_LOCATION);
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };
        assert_eq!(cfg.api_key().as_deref(), Some("FILE_KEY"));

        cfg.env_api_key = Some("ENV_KEY".into());
        assert_eq!(cfg.api_key().as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_keys_count_as_unset() {
        let mut cfg = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert_eq!(cfg.api_key(), None);

        cfg.env_api_key = Some("".into());
        assert_eq!(cfg.api_key(), None);

        cfg.api_key = Some(" FILE_KEY ".into());
        assert_eq!(cfg.api_key().as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_default_location_falls_back() {
        let mut cfg = Config {
            default_location: Some("".into()),
            ..Config::default()
        };
        assert_eq!(cfg.default_location(), DEFAULT_LOCATION);

        cfg.default_location = Some("  \t ".into());
        assert_eq!(cfg.default_location(), DEFAULT_LOCATION);

        cfg.default_location = Some(" Hanoi ".into());
        assert_eq!(cfg.default_location(), "Hanoi");
    }

    #[test]
    fn missing_file_loads_as_default() {
        let cfg = Config::load_from(&scratch_path("missing")).expect("load should succeed");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_roundtrip_skips_env_key() {
        let path = scratch_path("roundtrip");
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            default_location: Some("Hanoi".into()),
            timeout_secs: Some(7),
            env_api_key: Some("ENV_KEY".into()),
            ..Config::default()
        };

        cfg.save_to(&path).expect("save should succeed");
        let loaded = Config::load_from(&path).expect("load should succeed");

        assert_eq!(loaded.api_key.as_deref(), Some("FILE_KEY"));
        assert_eq!(loaded.default_location(), "Hanoi");
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(7)));
        assert_eq!(loaded.env_api_key, None);

        let _ = fs::remove_dir_all(path.parent().expect("scratch path has a parent"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = scratch_path("malformed");
        fs::create_dir_all(path.parent().expect("scratch path has a parent")).expect("mkdir");
        fs::write(&path, "timeout_secs = \"soon\"").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let _ = fs::remove_dir_all(path.parent().expect("scratch path has a parent"));
    }
}
