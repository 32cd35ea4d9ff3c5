//! Settings file handling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub backend: BackendParams,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendParams {
    pub base_url: String,
}

impl Default for BackendParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub fn get_app_data_dir() -> PathBuf {
    let data_dir = dirs_next::data_dir().expect("Failed to find data directory");
    let app_data_dir = data_dir.join("gemchat").join("data");
    if !app_data_dir.exists() {
        fs::create_dir_all(&app_data_dir).expect("Failed to create app data directory");
    }
    app_data_dir
}

fn get_app_config_path() -> PathBuf {
    let config_dir = dirs_next::config_dir().expect("Failed to find config directory");
    let app_config_dir = config_dir.join("gemchat").join("configuration");
    if !app_config_dir.exists() {
        fs::create_dir_all(&app_config_dir).expect("Failed to create app config directory");
    }
    app_config_dir.join("settings.json")
}

/// Loads the settings file, writing defaults if it is missing or malformed.
pub fn load_or_initialize_config() -> AppConfig {
    let config_path = get_app_config_path();
    if config_path.exists() {
        let content = fs::read_to_string(&config_path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|_| {
            let default_config = AppConfig::default();
            fs::write(
                &config_path,
                serde_json::to_string_pretty(&default_config).unwrap(),
            )
            .ok();
            default_config
        })
    } else {
        let default_config = AppConfig::default();
        fs::write(
            &config_path,
            serde_json::to_string_pretty(&default_config).unwrap(),
        )
        .expect("Failed to write default config file");
        default_config
    }
}
