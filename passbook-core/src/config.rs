//! Configuration management
//!
//! Settings live in settings.json inside the passbook directory:
//! ```json
//! {
//!   "app": { "currencySymbol": "£" }
//! }
//! ```
//! Fields the core doesn't manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    currency_symbol: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Passbook configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub currency_symbol: String,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

const DEFAULT_CURRENCY_SYMBOL: &str = "£";

impl Config {
    /// Load config from the passbook directory.
    ///
    /// The currency symbol can be overridden with the PASSBOOK_CURRENCY
    /// environment variable (for CI/testing).
    pub fn load(passbook_dir: &Path) -> Result<Self> {
        let settings_path = passbook_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let currency_symbol = std::env::var("PASSBOOK_CURRENCY")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| raw.app.currency_symbol.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

        Ok(Self {
            currency_symbol,
            _raw_settings: raw,
        })
    }

    /// Save config to the passbook directory, preserving settings the core
    /// doesn't manage.
    pub fn save(&self, passbook_dir: &Path) -> Result<()> {
        let settings_path = passbook_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.currency_symbol = Some(self.currency_symbol.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_settings_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.currency_symbol, "£");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::load(dir.path()).unwrap();
        config.currency_symbol = "$".to_string();
        config.save(dir.path()).unwrap();

        let reloaded = Config::load(dir.path()).unwrap();
        assert_eq!(reloaded.currency_symbol, "$");
    }

    #[test]
    fn test_unmanaged_fields_preserved_on_save() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"currencySymbol": "$", "theme": "dark"}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(content.contains("theme"));
        assert!(content.contains("dark"));
    }
}
