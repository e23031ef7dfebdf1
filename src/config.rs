//! Application configuration.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Overrides `analysis_delay_ms` when set to an integer.
pub const ANALYSIS_DELAY_ENV: &str = "CHARTDECK_ANALYSIS_DELAY_MS";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub with_background_color: bool,
    /// Simulated latency of the analysis service.
    pub analysis_delay_ms: u64,
    /// Pointer travel, in cells, before a press becomes a drag.
    pub drag_activation_distance: u16,
    /// Number of bars shown at once before zooming.
    pub bar_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            with_background_color: true,
            analysis_delay_ms: 2000,
            drag_activation_distance: 1,
            bar_window: 5,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Like [`Config::load_from_file`], but a missing file yields the defaults.
    /// The environment override is applied afterwards.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        let mut config = match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Config::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env(std::env::var(ANALYSIS_DELAY_ENV).ok().as_deref());
        Ok(config)
    }

    fn apply_env(&mut self, delay: Option<&str>) {
        if let Some(delay) = delay.and_then(|v| v.trim().parse().ok()) {
            self.analysis_delay_ms = delay;
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Default location, `~/.chartdeck/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to determine home directory",
        )
    })?;
    Ok(home_path.join(".chartdeck").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn custom() -> Config {
        Config {
            with_background_color: false,
            analysis_delay_ms: 10,
            drag_activation_distance: 3,
            bar_window: 4,
        }
    }

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = custom();
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = Config::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::default().save(&path).unwrap();
        let config2 = custom();
        config2.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        assert!(Config::load_from_file(&path).is_err());
        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    // A missing file falls back to the defaults.
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let mut config = Config::load_or_default(&path).unwrap();
        // Ignore whatever the environment says.
        config.analysis_delay_ms = Config::default().analysis_delay_ms;
        assert_eq!(config, Config::default());
    }

    #[test]
    // Fields absent from the file keep their defaults.
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"bar_window": 3}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.bar_window, 3);
        assert!(config.with_background_color);
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env(Some("150"));
        assert_eq!(config.analysis_delay_ms, 150);
        config.apply_env(Some("soon"));
        assert_eq!(config.analysis_delay_ms, 150);
        config.apply_env(None);
        assert_eq!(config.analysis_delay_ms, 150);
    }
}
