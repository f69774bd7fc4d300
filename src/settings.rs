use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_source_db")]
    pub source_db: String,
    #[serde(default = "default_output_csv")]
    pub output_csv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_file: Option<String>,
}

fn default_source_db() -> String {
    "data/MoneyKeeper.db".to_string()
}

fn default_output_csv() -> String {
    "data/iCost.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_db: default_source_db(),
            output_csv: default_output_csv(),
            mapping_file: None,
        }
    }
}

impl Settings {
    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(shellexpand_path(&self.source_db))
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(shellexpand_path(&self.output_csv))
    }

    pub fn mapping_path(&self) -> Option<PathBuf> {
        self.mapping_file.as_deref().map(|p| PathBuf::from(shellexpand_path(p)))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("nawallet2icost")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Result<Settings> {
    load_settings_from(&settings_path())
}

/// Defaults when the file is absent; an error when it exists but is invalid.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ConvertError::Settings(format!("{}: {e}", path.display())))
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ConvertError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Expand a leading `~` to the home directory. Other paths pass through, so
/// relative paths stay relative to the working directory.
pub fn shellexpand_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            source_db: "/backups/MoneyKeeper.db".to_string(),
            output_csv: "/exports/iCost.csv".to_string(),
            mapping_file: Some("/exports/mapping.json".to_string()),
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(s.source_db, "data/MoneyKeeper.db");
        assert_eq!(s.output_csv, "data/iCost.csv");
        assert!(s.mapping_file.is_none());
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"source_db": "/tmp/MoneyKeeper.db"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.source_db, "/tmp/MoneyKeeper.db");
        assert_eq!(s.output_csv, "data/iCost.csv");
    }

    #[test]
    fn test_invalid_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_settings_from(&path), Err(ConvertError::Settings(_))));
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&Settings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_mapping_file_omitted_when_unset() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(!json.contains("mapping_file"));
    }

    #[test]
    fn test_shellexpand_path() {
        assert_eq!(shellexpand_path("data/iCost.csv"), "data/iCost.csv");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                shellexpand_path("~/MoneyKeeper.db"),
                format!("{}/MoneyKeeper.db", home.to_string_lossy())
            );
        }
    }
}
