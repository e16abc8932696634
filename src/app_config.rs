/*!
 * Application configuration.
 *
 * Loads, creates and saves the JSON settings file.
 */

use anyhow::{Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Selection tracking behaviour
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// When a selected-set replacement is announced to listeners
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Announce only when the new set differs from the current one
    #[default]
    OnChange,
    /// Announce every replacement, even an identical one
    Always,
}

/// Which line becomes active when a session starts
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialActiveLine {
    /// First line of the document, selected on its own
    #[default]
    First,
    /// No active line and an empty selection
    None,
}

/// Selection controller settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Notification policy for selected-set changes
    #[serde(default)]
    pub selected_set_notify: NotifyPolicy,

    /// Refuse lines that the document does not contain
    #[serde(default = "default_true")]
    pub validate_lines: bool,

    /// Session start state
    #[serde(default)]
    pub initial_active_line: InitialActiveLine,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selected_set_notify: NotifyPolicy::default(),
            validate_lines: default_true(),
            initial_active_line: InitialActiveLine::default(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Load the configuration at `path`, creating a default one if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
