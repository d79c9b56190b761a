use crate::error::{Result, ShelfError};
use crate::model::DEFAULT_HIGHLIGHT_COLOR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:5173/";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for the shelf host, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Page URL of the dashboard; share links are built on top of it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fill color for new highlights
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    /// One of off, error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_highlight_color() -> String {
    DEFAULT_HIGHLIGHT_COLOR.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            highlight_color: default_highlight_color(),
            log_level: default_log_level(),
        }
    }
}

impl ShelfConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShelfError::Io)?;
        let config: ShelfConfig =
            serde_json::from_str(&content).map_err(ShelfError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShelfError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ShelfError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(ShelfError::Io)?;
        Ok(())
    }

    /// Set a key by its CLI name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(ShelfError::Api(format!(
                        "base-url must be an absolute http(s) URL: {value}"
                    )));
                }
                self.base_url = value.to_string();
            }
            "highlight-color" => self.highlight_color = value.to_string(),
            "log-level" => {
                if value.parse::<log::LevelFilter>().is_err() {
                    return Err(ShelfError::Api(format!("Unknown log level: {value}")));
                }
                self.log_level = value.to_lowercase();
            }
            other => return Err(ShelfError::Api(format!("Unknown config key: {other}"))),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "base-url" => Some(&self.base_url),
            "highlight-color" => Some(&self.highlight_color),
            "log-level" => Some(&self.log_level),
            _ => None,
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub const KEYS: [&'static str; 3] = ["base-url", "highlight-color", "log-level"];
}
