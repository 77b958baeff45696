//! Console messages for communication between layers.
//!
//! - View -> Core: submitted lines, log lines, mode switches
//! - Core -> View: appended output, clear requests
//! - Core -> Game: accepted commands

use bevy::prelude::*;

use super::{ConsoleMode, Dispatch, DispatchArgs};

/// Message sent when a line is submitted to the console.
///
/// # Examples
///
/// ```ignore
/// fn submit_command(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("teleport player 0 10 0"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw line, as typed.
    pub command: String,
}

impl ConsoleInputEvent {
    /// Create a new input event.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Which buffer an output line was appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    /// Command history (timestamped).
    History,
    /// Debug log.
    Debug,
}

/// Message carrying a line appended to one of the console buffers.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutputEvent {
    /// The line as stored in the buffer.
    pub message: String,
    /// The buffer it was appended to.
    pub stream: OutputStream,
}

impl ConsoleOutputEvent {
    /// Create a new output event.
    pub fn new(stream: OutputStream, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stream,
        }
    }

    /// Create a history line.
    pub fn history(message: impl Into<String>) -> Self {
        Self::new(OutputStream::History, message)
    }

    /// Create a debug log line.
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(OutputStream::Debug, message)
    }
}

/// Message sent for every accepted command.
///
/// This is the ECS-side counterpart of the closure channels: game systems can
/// read it instead of holding a [`Subscription`](super::Subscription).
///
/// # Examples
///
/// ```ignore
/// fn on_speed(mut events: MessageReader<ConsoleCommandEvent>, mut speed: ResMut<Speed>) {
///     for event in events.read() {
///         if let Dispatch::Float(args, value) = &event.dispatch {
///             if args.keyword() == "speed" {
///                 speed.0 = *value;
///             }
///         }
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ConsoleCommandEvent {
    /// The typed command.
    pub dispatch: Dispatch,
}

impl ConsoleCommandEvent {
    /// Get the dispatch arguments.
    pub fn args(&self) -> &DispatchArgs {
        self.dispatch.args()
    }

    /// Get the command keyword.
    pub fn keyword(&self) -> &str {
        self.dispatch.keyword()
    }
}

/// Message that records a line in the console's debug log.
#[derive(Message, Debug, Clone)]
pub struct ConsoleLogEvent {
    pub message: String,
}

impl ConsoleLogEvent {
    /// Create a new log event.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Message that switches the console between history and debug views.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleModeEvent {
    /// Switch to the given mode.
    Set(ConsoleMode),
    /// Switch to the other mode.
    Toggle,
}

/// Message sent after the active buffer was cleared.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ConsoleClearEvent;

/// Plugin that registers all console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConsoleCommandEvent>()
            .add_message::<ConsoleLogEvent>()
            .add_message::<ConsoleModeEvent>()
            .add_message::<ConsoleClearEvent>();
    }
}
