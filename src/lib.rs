//! An in-game developer console for Bevy with typed command channels.
//!
//! The console keeps a table of command definitions, parses each submitted
//! line against it and hands the typed result to subscribers:
//!
//! - **CommandDefinition**: Keyword aliases plus an argument shape
//!   (trigger, vector, float or int)
//! - **DevConsole**: History and debug buffers, built-in `help`/`clear`,
//!   optional daily log files
//! - **Channels**: Typed callbacks with RAII subscriptions
//! - **Messages**: ECS counterparts for input, output and accepted commands
//!
//! # Features
//!
//! - `egui` (default): egui-based UI with log capture
//! - `capture`: forward engine logs into the debug buffer
//! - `terminal`: stdin/stdout backend for dedicated servers
//! - `persist`: RON config file with the command table
//! - `full`: Enable egui + persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_typed_console::prelude::*;
//!
//! fn main() {
//!     let config = ConsoleConfig::default()
//!         .feedback(true)
//!         .command(CommandDefinition::new("speed", CommandKind::Float).description("Set speed"));
//!
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin::new(config))
//!         .add_systems(Update, on_speed)
//!         .run();
//! }
//!
//! fn on_speed(mut events: MessageReader<ConsoleCommandEvent>) {
//!     for event in events.read() {
//!         if let Dispatch::Float(args, value) = &event.dispatch {
//!             info!("{} -> {}", args, value);
//!         }
//!     }
//! }
//! ```

use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;
pub mod config;

// Engine log capture (feature-gated)
#[cfg(feature = "capture")]
pub mod logging;

// UI module (feature-gated)
#[cfg(feature = "egui")]
pub mod ui;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

// Re-export core types at crate root for convenience
pub use core::{
    CommandDefinition, CommandKind, DispatchArgs,
    CommandRegistry, HistoryBuffer,
    tokenize, parse_line, coerce, Action, Dispatch,
    Channel, ConsoleChannels, Subscription,
    LogFile, LogFileConfig, LogFileError,
    DevConsole, ConsoleMode, ConsoleColors, Outcome, color_command,
    ConsoleInputEvent, ConsoleOutputEvent, OutputStream, ConsoleCommandEvent,
    ConsoleLogEvent, ConsoleModeEvent, ConsoleClearEvent,
    ConsoleEventsPlugin,
};
pub use config::ConsoleConfig;

#[cfg(feature = "capture")]
pub use logging::{console_log_layer, LogCaptureFilter};

#[cfg(feature = "egui")]
pub use ui::{ConsoleUiConfig, ConsoleUiState};

#[cfg(feature = "persist")]
pub use persist::{ConsoleConfigFile, CommandEntry, ConfigPath, ConfigError};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalPlugin, TerminalConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CommandDefinition, CommandKind, DispatchArgs, Dispatch,
        DevConsole, ConsoleMode, Outcome, Subscription, color_command,
        ConsoleInputEvent, ConsoleOutputEvent, OutputStream, ConsoleCommandEvent,
        ConsoleLogEvent, ConsoleModeEvent, ConsoleClearEvent,
    };
    pub use crate::config::ConsoleConfig;
    pub use crate::ConsolePlugin;
}

/// Main console plugin.
///
/// Inserts a [`DevConsole`] built from the given [`ConsoleConfig`] and wires
/// the console messages to it.
///
/// # Configuration
///
/// ```ignore
/// ConsolePlugin::new(ConsoleConfig::default().history_capacity(20))
/// ```
#[derive(Default)]
pub struct ConsolePlugin {
    pub config: ConsoleConfig,
}

impl ConsolePlugin {
    /// Create the plugin with a configuration.
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DevConsole::new(self.config.clone()))
            .add_plugins(core::ConsoleEventsPlugin);

        // 1. apply_console_events: Mode switches and external log lines
        // 2. submit_console_input: Parse lines, invoke channels, announce results
        // 3. send_pending_outputs: Publish lines appended to either buffer
        app.add_systems(Update, (
            apply_console_events,
            submit_console_input,
            send_pending_outputs,
        ).chain());

        // Persistence (feature-gated)
        #[cfg(feature = "persist")]
        {
            app.init_resource::<persist::ConfigPath>()
                .add_systems(Startup, persist::load_config_on_startup);
        }

        // egui UI (feature-gated)
        #[cfg(feature = "egui")]
        {
            use bevy_egui::EguiPrimaryContextPass;
            use ui::{ConsoleUiConfig, ConsoleUiState};

            app.init_resource::<ConsoleUiState>()
                .init_resource::<ConsoleUiConfig>()
                .add_systems(Update, ui::open_close_ui)
                .add_systems(
                    EguiPrimaryContextPass,
                    ui::render_ui_system.run_if(|s: Res<ConsoleUiState>| s.open),
                );
        }

        // Terminal backend (feature-gated)
        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// System that applies mode switches and log lines sent as messages.
fn apply_console_events(
    mut console: ResMut<DevConsole>,
    mut mode_events: MessageReader<ConsoleModeEvent>,
    mut log_events: MessageReader<ConsoleLogEvent>,
) {
    for event in mode_events.read() {
        match event {
            ConsoleModeEvent::Set(mode) => console.set_mode(*mode),
            ConsoleModeEvent::Toggle => console.toggle_mode(),
        }
    }
    for event in log_events.read() {
        console.log(event.message.clone());
    }
}

/// System that submits input lines and announces accepted commands.
fn submit_console_input(
    mut console: ResMut<DevConsole>,
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut command_events: MessageWriter<ConsoleCommandEvent>,
    mut clear_events: MessageWriter<ConsoleClearEvent>,
) {
    for event in input_events.read() {
        match console.submit(&event.command) {
            Outcome::Accepted(dispatch) => {
                command_events.write(ConsoleCommandEvent { dispatch });
            }
            Outcome::Cleared => {
                clear_events.write(ConsoleClearEvent);
            }
            Outcome::Rejected | Outcome::Help => {}
        }
    }
}

/// System that sends queued output events.
fn send_pending_outputs(
    mut console: ResMut<DevConsole>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
) {
    for output in console.drain_output() {
        output_events.write(output);
    }
}
