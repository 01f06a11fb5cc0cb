use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_DB_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat_room.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// User the room acts as when `--user` is not given.
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default = "default_window_title")]
    pub window_title: String,
}

fn default_database_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_window_title() -> String {
    "Chat Room".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            current_user: None,
            window_title: default_window_title(),
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

/// Remember `user_id` as the default user for later runs.
pub fn persist_current_user(path: &str, user_id: &str) {
    let mut config = load_config(path);
    if config.current_user.as_deref() == Some(user_id) {
        return;
    }
    config.current_user = Some(user_id.to_string());

    if let Err(err) = save_config(path, &config) {
        log::error!("Failed to write config {}: {err}", path);
    } else {
        log::info!("Persisted current user {} to {}", user_id, path);
    }
}
