//! Core console types.
//!
//! This module provides the fundamental building blocks:
//! - [`CommandDefinition`] - Keyword aliases and the argument shape of a command
//! - [`CommandRegistry`] - Ordered, first-match command lookup
//! - [`HistoryBuffer`] - Bounded FIFO of output lines
//! - [`parse_line`] / [`coerce`] - The command grammar and typed argument parsing
//! - [`ConsoleChannels`] - Typed callbacks with RAII [`Subscription`]s
//! - [`DevConsole`] - The console object tying it all together
//! - [`LogFile`] - Daily append-only log files
//! - Messages for communication between layers

mod command;
mod history;
mod registry;
mod tokenizer;
mod dispatcher;
mod channels;
mod log_file;
mod events;
mod console;

pub use command::{CommandDefinition, CommandKind, DispatchArgs};
pub use history::{HistoryBuffer, MAX_CAPACITY};
pub use registry::{CommandRegistry, EMPTY_REGISTRY_HELP};
pub use tokenizer::tokenize;
pub use dispatcher::{
    parse_line, coerce, Action, Dispatch,
    CLEAR_VERB, HELP_VERB, UNKNOWN_HELP_MESSAGE,
};
pub use channels::{Channel, ConsoleChannels, Subscriber, Subscription};
pub use log_file::{
    clock_stamp, date_stamp, LogFile, LogFileConfig, LogFileError,
    DEFAULT_LOG_DIRECTORY, DEFAULT_HISTORY_LOG_FILE, DEFAULT_DEBUG_LOG_FILE,
};
pub use events::{
    ConsoleInputEvent, ConsoleOutputEvent, OutputStream, ConsoleCommandEvent,
    ConsoleLogEvent, ConsoleModeEvent, ConsoleClearEvent,
    ConsoleEventsPlugin,
};
pub use console::{
    DevConsole, ConsoleMode, ConsoleColors, Outcome, color_command,
    INVALID_COMMAND_MESSAGE, NO_COMMANDS_MESSAGE, STARTUP_LOG_MESSAGE,
    COLOR_KEYWORD, COLOR_BACKGROUND, COLOR_TEXT,
};
