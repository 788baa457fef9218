use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keybindings::KeybindingsConfig;
use crate::location::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON in settings.json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_input_max_len() -> usize {
    7
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Per-source key binding overrides
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    /// Copy edited colors to the system clipboard (OSC 52)
    #[serde(default = "default_true")]
    pub clipboard: bool,
    /// Base URL used when the location given on the command line is a bare fragment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum characters accepted by the hex input ("#RRGGBB" is 7)
    #[serde(default = "default_input_max_len")]
    pub input_max_len: usize,
    /// Write a debug log to ~/.colorman/debug/colorman.log
    #[serde(default)]
    pub debug_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keybindings: KeybindingsConfig::default(),
            clipboard: true,
            base_url: default_base_url(),
            input_max_len: default_input_max_len(),
            debug_log: false,
        }
    }
}

impl Settings {
    /// Returns the config directory path (~/.colorman)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".colorman"))
    }

    /// Returns the debug log directory path (~/.colorman/debug)
    pub fn debug_dir() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("debug"))
    }

    /// Loads settings from ~/.colorman/settings.json, creating it with
    /// defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let dir = Self::config_dir().ok_or(ConfigError::NoHomeDir)?;
        Self::load_from(&dir)
    }

    /// Loads `settings.json` from `dir`. A missing file is written with
    /// defaults; a present but broken one is an error.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("settings.json");
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(dir)?;
            return Ok(settings);
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saves settings using the atomic write pattern
    pub fn save_to(&self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            // Set directory permissions to user-only on Unix
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
            }
        }

        let config_path = dir.join("settings.json");
        let temp_path = dir.join("settings.json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &config_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.clipboard);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.input_max_len, 7);
        assert!(!settings.debug_log);
    }

    #[test]
    fn test_parse_partial_json() {
        let json = r#"{"clipboard": false, "keybindings": {"global": {"quit": ["ctrl+x"]}}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.clipboard);
        assert_eq!(settings.input_max_len, 7);
        assert_eq!(settings.keybindings.global.len(), 1);
        assert!(!settings.keybindings.swatch.is_empty());
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".colorman");
        let settings = Settings::load_from(&cfg_dir).unwrap();
        assert!(settings.clipboard);
        assert!(cfg_dir.join("settings.json").exists());
        assert!(!cfg_dir.join("settings.json.tmp").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.base_url = "https://example.com/palette".to_string();
        settings.debug_log = true;
        settings.save_to(dir.path()).unwrap();

        let loaded = Settings::load_from(dir.path()).unwrap();
        assert_eq!(loaded.base_url, "https://example.com/palette");
        assert!(loaded.debug_log);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert!(matches!(Settings::load_from(dir.path()), Err(ConfigError::Json(_))));
    }
}
