//! Persistence layer for console configuration.
//!
//! Provides a RON config file holding the console settings and the command
//! table. It is the external loader for commands: games ship a `console.ron`
//! instead of registering every command in code.
//!
//! ```ron
//! (
//!     history_capacity: 20,
//!     feedback: true,
//!     debug_log: (enabled: true, file_name: "debug_log.txt"),
//!     commands: [
//!         (keywords: ["teleport", "tp"], kind: Vector, description: "Move a target"),
//!         (keywords: ["god"], description: "Toggle invulnerability", help: false),
//!     ],
//! )
//! ```

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConsoleConfig;
use crate::core::{CommandDefinition, CommandKind, DevConsole, LogFileConfig};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// One command table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Keywords, primary first. Must not be empty.
    pub keywords: Vec<String>,
    /// Argument shape.
    #[serde(default)]
    pub kind: CommandKind,
    /// Help description.
    #[serde(default)]
    pub description: String,
    /// Whether `help` lists the command.
    #[serde(default = "default_help")]
    pub help: bool,
}

fn default_help() -> bool {
    true
}

impl CommandEntry {
    /// Convert into a definition, rejecting entries without keywords.
    pub fn into_definition(self) -> Result<CommandDefinition, ConfigError> {
        let keywords: Vec<&str> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();

        let definition = CommandDefinition::from_aliases(keywords, self.kind).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "command '{}' has no keywords",
                self.description
            ))
        })?;

        Ok(definition.description(self.description).help(self.help))
    }
}

impl From<&CommandDefinition> for CommandEntry {
    fn from(definition: &CommandDefinition) -> Self {
        Self {
            keywords: definition.aliases().map(str::to_string).collect(),
            kind: definition.kind(),
            description: definition.get_description().to_string(),
            help: definition.is_help_visible(),
        }
    }
}

/// Serializable console configuration.
///
/// Every setting is optional: keys missing from the file keep the value the
/// console already has. Commands in the file are appended to the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_capacity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_capacity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_log: Option<LogFileConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log: Option<LogFileConfig>,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

impl ConsoleConfigFile {
    /// Create a file representation of a config with every key present.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            history_capacity: Some(config.history_capacity),
            debug_capacity: Some(config.debug_capacity),
            debug_mode: Some(config.debug_mode),
            feedback: Some(config.feedback),
            history_log: Some(config.history_log.clone()),
            debug_log: Some(config.debug_log.clone()),
            commands: config.commands.iter().map(CommandEntry::from).collect(),
        }
    }

    /// Lay the file over `base`: present keys replace base settings and the
    /// file's commands follow the base's.
    pub fn overlay(self, mut base: ConsoleConfig) -> Result<ConsoleConfig, ConfigError> {
        let commands = self
            .commands
            .into_iter()
            .map(CommandEntry::into_definition)
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(capacity) = self.history_capacity {
            base.history_capacity = capacity;
        }
        if let Some(capacity) = self.debug_capacity {
            base.debug_capacity = capacity;
        }
        if let Some(enabled) = self.debug_mode {
            base.debug_mode = enabled;
        }
        if let Some(enabled) = self.feedback {
            base.feedback = enabled;
        }
        if let Some(log) = self.history_log {
            base.history_log = log;
        }
        if let Some(log) = self.debug_log {
            base.debug_log = log;
        }
        base.commands.extend(commands);
        Ok(base)
    }

    /// Convert into a console config, filling missing keys with defaults.
    pub fn into_config(self) -> Result<ConsoleConfig, ConfigError> {
        self.overlay(ConsoleConfig::default())
    }

    /// Load config from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;

        ron_options()
            .from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save config to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::Io(parent.display().to_string(), e.to_string()))?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let contents = ron_options()
            .to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))
    }

    /// Load config from file, returning default if file doesn't exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// RON options that let optional keys be written as plain values.
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Errors that can occur during config operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error (path, message).
    Io(String, String),
    /// Parse error (path, message).
    Parse(String, String),
    /// Serialization error.
    Serialize(String),
    /// The file parsed but describes an unusable config.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, msg) => write!(f, "IO error for '{}': {}", path, msg),
            ConfigError::Parse(path, msg) => write!(f, "Parse error for '{}': {}", path, msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resource tracking the config file path.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_FILE.to_string())
    }
}

/// Load a config file and apply it to the console.
///
/// Settings missing from the file keep their current values.
pub fn apply_config_file(console: &mut DevConsole, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let config = ConsoleConfigFile::load(path)?.overlay(console.settings().clone())?;
    console.apply_config(config);
    Ok(())
}

/// System to load config on startup.
pub fn load_config_on_startup(mut console: ResMut<DevConsole>, config_path: Res<ConfigPath>) {
    let path = &config_path.0;

    if !Path::new(path).exists() {
        info!("No console config found at '{}', using defaults", path);
        return;
    }

    match apply_config_file(&mut console, path) {
        Ok(()) => info!("Loaded console config from '{}'", path),
        Err(e) => error!("Failed to load console config: {}", e),
    }
}
