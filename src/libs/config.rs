//! Configuration file handling.
//!
//! Settings live in `config.yaml` inside the application directory
//! (`~/.smart-nippo` unless `SMART_NIPPO_HOME` says otherwise). A missing
//! file means defaults; every section and key is optional in the file.
//!
//! The engine treats these values as opaque: the database path is opened,
//! the editor command is handed to the memo prompt, and formats are only
//! parsed where they are used.
//!
//! ```yaml
//! database:
//!   path: ""            # empty: data.db in the application directory
//! editor:
//!   command: vim
//! display:
//!   date_format: "%Y-%m-%d"
//!   time_format: "%H:%M"
//! defaults:
//!   project: ""
//!   template: default
//!   export_format: markdown
//! ```

use super::data_storage::{expand_home, DataStorage};
use crate::db::db::DB_FILE_NAME;
use crate::libs::error::{NippoError, Result};
use crate::libs::input::prompt_error;
use crate::libs::messages::Message;
use crate::msg_print;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { command: "vim".to_string() }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub date_format: String,
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub project: String,
    pub template: String,
    pub export_format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            template: "default".to_string(),
            export_format: "markdown".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub editor: EditorConfig,
    pub display: DisplayConfig,
    pub defaults: DefaultsConfig,
}

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 7] = [
    "database.path",
    "editor.command",
    "display.date_format",
    "display.time_format",
    "defaults.project",
    "defaults.template",
    "defaults.export_format",
];

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml_ng::from_str(&content).map_err(|e| NippoError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml_ng::to_string(self).map_err(|e| NippoError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        match self.database.path.trim() {
            "" => DataStorage::new().base_path().join(DB_FILE_NAME),
            path => expand_home(path),
        }
    }

    /// `$EDITOR` wins over the configured command.
    pub fn editor_command(&self) -> String {
        match env::var("EDITOR") {
            Ok(editor) if !editor.trim().is_empty() => editor,
            _ => self.editor.command.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "database.path" => &self.database.path,
            "editor.command" => &self.editor.command,
            "display.date_format" => &self.display.date_format,
            "display.time_format" => &self.display.time_format,
            "defaults.project" => &self.defaults.project,
            "defaults.template" => &self.defaults.template,
            "defaults.export_format" => &self.defaults.export_format,
            _ => return Err(unknown_key(key)),
        };
        Ok(value.clone())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "database.path" => &mut self.database.path,
            "editor.command" => &mut self.editor.command,
            "display.date_format" => &mut self.display.date_format,
            "display.time_format" => &mut self.display.time_format,
            "defaults.project" => &mut self.defaults.project,
            "defaults.template" => &mut self.defaults.template,
            "defaults.export_format" => &mut self.defaults.export_format,
            _ => return Err(unknown_key(key)),
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Interactive setup, prefilled with the current values.
    pub fn init() -> Result<Self> {
        Self::init_at(&Self::path()?)
    }

    /// Interactive setup over the file at `path`. A file that does not
    /// parse fails before anything is asked.
    pub fn init_at(path: &Path) -> Result<Self> {
        let mut config = Self::read_from(path)?;
        msg_print!(Message::ConfigWizardHeader, true);

        for key in CONFIG_KEYS {
            let current = config.get(key)?;
            let value: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(key)
                .default(current)
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            config.set(key, &value)?;
        }

        Ok(config)
    }
}

fn unknown_key(key: &str) -> NippoError {
    NippoError::Config(format!("unknown key '{}' (expected one of: {})", key, CONFIG_KEYS.join(", ")))
}
