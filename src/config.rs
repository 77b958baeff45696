//! Console configuration.

use crate::core::{
    CommandDefinition, LogFileConfig, DEFAULT_DEBUG_LOG_FILE, DEFAULT_HISTORY_LOG_FILE,
};

/// Default number of command history lines kept.
pub const DEFAULT_HISTORY_CAPACITY: u8 = 10;
/// Default number of debug log lines kept.
pub const DEFAULT_DEBUG_CAPACITY: u8 = 255;

/// Settings used to construct a [`DevConsole`](crate::core::DevConsole).
///
/// # Examples
///
/// ```
/// use bevy_typed_console::ConsoleConfig;
/// use bevy_typed_console::core::{CommandDefinition, CommandKind};
///
/// let config = ConsoleConfig::default()
///     .feedback(true)
///     .command(CommandDefinition::new("fly", CommandKind::Trigger));
///
/// assert_eq!(config.commands.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Lines kept in the command history (clamped to at least 1).
    pub history_capacity: u8,
    /// Lines kept in the debug log (clamped to at least 1).
    pub debug_capacity: u8,
    /// Start in debug mode, showing the debug log instead of history.
    pub debug_mode: bool,
    /// Append a confirmation line after each accepted command.
    pub feedback: bool,
    /// Mirror the command history to disk.
    pub history_log: LogFileConfig,
    /// Mirror the debug log to disk.
    pub debug_log: LogFileConfig,
    /// The command table, in lookup order.
    pub commands: Vec<CommandDefinition>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            debug_capacity: DEFAULT_DEBUG_CAPACITY,
            debug_mode: false,
            feedback: false,
            history_log: LogFileConfig::named(DEFAULT_HISTORY_LOG_FILE),
            debug_log: LogFileConfig::named(DEFAULT_DEBUG_LOG_FILE),
            commands: Vec::new(),
        }
    }
}

impl ConsoleConfig {
    /// Set the history capacity.
    pub fn history_capacity(mut self, capacity: u8) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the debug log capacity.
    pub fn debug_capacity(mut self, capacity: u8) -> Self {
        self.debug_capacity = capacity;
        self
    }

    /// Set the initial mode.
    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Enable or disable command feedback.
    pub fn feedback(mut self, enabled: bool) -> Self {
        self.feedback = enabled;
        self
    }

    /// Set the history log stream.
    pub fn history_log(mut self, log: LogFileConfig) -> Self {
        self.history_log = log;
        self
    }

    /// Set the debug log stream.
    pub fn debug_log(mut self, log: LogFileConfig) -> Self {
        self.debug_log = log;
        self
    }

    /// Append a command to the table.
    pub fn command(mut self, command: CommandDefinition) -> Self {
        self.commands.push(command);
        self
    }

    /// Append several commands to the table.
    pub fn commands(mut self, commands: impl IntoIterator<Item = CommandDefinition>) -> Self {
        self.commands.extend(commands);
        self
    }
}
