use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DeduceError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the trained model artifact.
    #[serde(default)]
    pub model_path: String,
    /// Path to a custom rules JSON file; empty means the built-in rules.
    #[serde(default)]
    pub rules_path: String,
    #[serde(default = "default_use_ml")]
    pub use_ml: bool,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_use_ml() -> bool {
    true
}

fn default_threshold() -> f64 {
    0.5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            rules_path: String::new(),
            use_ml: default_use_ml(),
            threshold: default_threshold(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("deduce")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| DeduceError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}
