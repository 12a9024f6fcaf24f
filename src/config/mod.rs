use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Editor configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// General editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Editor settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    /// Tab size
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Use spaces instead of tabs
    #[serde(default = "default_use_spaces")]
    pub use_spaces: bool,

    /// Show line numbers
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Auto save
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,

    /// Auto save delay in milliseconds
    #[serde(default = "default_auto_save_delay")]
    pub auto_save_delay: u64,
}

/// UI settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    /// Show status bar
    #[serde(default = "default_show_status_bar")]
    pub show_status_bar: bool,

    /// How long toast notifications stay up, in milliseconds
    #[serde(default = "default_toast_duration")]
    pub toast_duration: u64,
}

// Default values
fn default_tab_size() -> usize {
    4
}
fn default_use_spaces() -> bool {
    true
}
fn default_show_line_numbers() -> bool {
    true
}
fn default_auto_save() -> bool {
    false
}
fn default_auto_save_delay() -> u64 {
    1000
}
fn default_show_status_bar() -> bool {
    true
}
fn default_toast_duration() -> u64 {
    3000
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            use_spaces: default_use_spaces(),
            show_line_numbers: default_show_line_numbers(),
            auto_save: default_auto_save(),
            auto_save_delay: default_auto_save_delay(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: default_show_status_bar(),
            toast_duration: default_toast_duration(),
        }
    }
}

/// Directory holding `config.json` and the log file
pub fn default_user_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quill")
}

/// Configuration manager
pub struct ConfigManager {
    /// The config
    config: Config,

    /// The path to the config file
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager
    pub fn new(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");

        Self {
            config: Config::default(),
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config
    pub fn load(&mut self) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Load config if it exists, otherwise use defaults
        if self.config_path.exists() {
            let config_str = fs::read_to_string(&self.config_path)?;
            self.config = serde_json::from_str(&config_str)
                .map_err(|e| anyhow!("Failed to parse config: {}", e))?;
        }

        Ok(())
    }

    /// Save the config
    pub fn save(&self) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_str)?;
        Ok(())
    }

    /// Get the config
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the config
    pub fn get_config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Update a setting
    pub fn update_setting(&mut self, path: &str, value: serde_json::Value) -> Result<()> {
        match path {
            "editor.tabSize" => {
                self.config.editor.tab_size =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))? as usize;
            }
            "editor.useSpaces" => {
                self.config.editor.use_spaces =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "editor.showLineNumbers" => {
                self.config.editor.show_line_numbers =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "editor.autoSave" => {
                self.config.editor.auto_save =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "editor.autoSaveDelay" => {
                self.config.editor.auto_save_delay =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))?;
            }
            "ui.showStatusBar" => {
                self.config.ui.show_status_bar =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "ui.toastDuration" => {
                self.config.ui.toast_duration =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))?;
            }
            _ => {
                return Err(anyhow!("Unsupported setting path: {}", path));
            }
        }

        Ok(())
    }

    /// Get a setting by path
    pub fn get_setting(&self, path: &str) -> Result<serde_json::Value> {
        match path {
            "editor.tabSize" => Ok(serde_json::json!(self.config.editor.tab_size)),
            "editor.useSpaces" => Ok(serde_json::json!(self.config.editor.use_spaces)),
            "editor.showLineNumbers" => Ok(serde_json::json!(self.config.editor.show_line_numbers)),
            "editor.autoSave" => Ok(serde_json::json!(self.config.editor.auto_save)),
            "editor.autoSaveDelay" => Ok(serde_json::json!(self.config.editor.auto_save_delay)),
            "ui.showStatusBar" => Ok(serde_json::json!(self.config.ui.show_status_bar)),
            "ui.toastDuration" => Ok(serde_json::json!(self.config.ui.toast_duration)),
            _ => Err(anyhow!("Unsupported setting path: {}", path)),
        }
    }
}
