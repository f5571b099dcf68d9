use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// A fixed position used as the "current location" when no platform
/// positioning service is available.
///
/// Example TOML:
/// [home]
/// latitude = 50.45
/// longitude = 30.52
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Optional home coordinates for the current-location card.
    pub home: Option<HomeLocation>,
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unconfigured() {
        let cfg = Config::default();

        assert!(!cfg.is_configured());
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.home, None);
    }

    #[test]
    fn set_api_key_marks_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(cfg.is_configured());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            home: Some(HomeLocation { latitude: 50.45, longitude: 30.52 }),
        };

        let encoded = toml::to_string_pretty(&cfg).expect("serialize");
        let decoded: Config = toml::from_str(&encoded).expect("parse");

        assert_eq!(decoded.api_key(), Some("KEY"));
        assert_eq!(decoded.home, cfg.home);
    }
}
