//! The developer console.
//!
//! [`DevConsole`] owns the command registry, the two output buffers, the
//! rendered view text and the typed channels. It is an ordinary value: build
//! one with [`DevConsole::new`] and hand it to whatever view drives it. The
//! [`ConsolePlugin`](crate::ConsolePlugin) stores it as a resource.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{
    clock_stamp, parse_line, tokenize, Action, CommandDefinition, CommandKind, CommandRegistry,
    ConsoleChannels, ConsoleOutputEvent, Dispatch, DispatchArgs, HistoryBuffer, LogFile,
    OutputStream, Subscription,
};
use crate::config::ConsoleConfig;

/// Recorded when a line does not resolve to a valid command.
pub const INVALID_COMMAND_MESSAGE: &str = "Invalid command!";
/// Recorded when a line is submitted while no commands are registered.
pub const NO_COMMANDS_MESSAGE: &str = "Unable to locate any console commands.";
/// First line of every debug log.
pub const STARTUP_LOG_MESSAGE: &str = "Started logging";

/// Keyword of the built-in color handler.
pub const COLOR_KEYWORD: &str = "color";
/// Color sub-target for the console background.
pub const COLOR_BACKGROUND: &str = "bg";
/// Color sub-target for the console text.
pub const COLOR_TEXT: &str = "text";

/// Which buffer the console shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleMode {
    /// Command history.
    #[default]
    Normal,
    /// Debug log.
    Debug,
}

impl ConsoleMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ConsoleMode::Normal => ConsoleMode::Debug,
            ConsoleMode::Debug => ConsoleMode::Normal,
        }
    }
}

/// Result of submitting a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A channel was invoked.
    Accepted(Dispatch),
    /// The line was reported as invalid.
    Rejected,
    /// Help text was printed.
    Help,
    /// The active buffer was cleared.
    Cleared,
}

impl Outcome {
    /// Check if a channel was invoked.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Get the dispatch, if a channel was invoked.
    pub fn dispatch(&self) -> Option<&Dispatch> {
        match self {
            Outcome::Accepted(dispatch) => Some(dispatch),
            _ => None,
        }
    }
}

/// Colors the view paints with. Changed by `color <bg|text> r g b a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsoleColors {
    pub background: Color,
    pub text: Color,
}

impl Default for ConsoleColors {
    fn default() -> Self {
        Self {
            background: Color::srgba(0.05, 0.05, 0.05, 0.85),
            text: Color::WHITE,
        }
    }
}

/// Definition for the built-in color command.
///
/// Register it to let `color bg 0 0 0 1` and `color text 1 1 0 1` restyle the
/// console.
pub fn color_command() -> CommandDefinition {
    CommandDefinition::new(COLOR_KEYWORD, CommandKind::Vector)
        .description("Set console colors: color <bg|text> <r> <g> <b> <a>")
}

/// An in-game developer console.
///
/// # Examples
///
/// ```
/// use bevy_typed_console::ConsoleConfig;
/// use bevy_typed_console::core::{CommandDefinition, CommandKind, DevConsole};
///
/// let mut console = DevConsole::new(
///     ConsoleConfig::default().command(CommandDefinition::new("speed", CommandKind::Float)),
/// );
///
/// let _speed = console.on_float(|args, value| {
///     assert_eq!(args.keyword(), "speed");
///     assert_eq!(value, 2.5);
/// });
///
/// assert!(console.submit("speed 2.5").is_accepted());
/// ```
#[derive(Resource, Debug)]
pub struct DevConsole {
    registry: CommandRegistry,
    history: HistoryBuffer,
    debug: HistoryBuffer,
    mode: ConsoleMode,
    feedback: bool,
    text: String,
    colors: ConsoleColors,
    channels: ConsoleChannels,
    history_file: Option<LogFile>,
    debug_file: Option<LogFile>,
    pending_output: VecDeque<ConsoleOutputEvent>,
    settings: ConsoleConfig,
}

impl Default for DevConsole {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl DevConsole {
    /// Create a console from its configuration.
    pub fn new(config: ConsoleConfig) -> Self {
        let mut console = Self {
            registry: CommandRegistry::new(),
            history: HistoryBuffer::new(config.history_capacity.into()),
            debug: HistoryBuffer::new(config.debug_capacity.into()),
            mode: ConsoleMode::Normal,
            feedback: false,
            text: String::new(),
            colors: ConsoleColors::default(),
            channels: ConsoleChannels::default(),
            history_file: None,
            debug_file: None,
            pending_output: VecDeque::new(),
            settings: ConsoleConfig::default(),
        };
        console.apply_config(config);
        console.log(STARTUP_LOG_MESSAGE);
        console
    }

    /// Apply a configuration to a running console.
    ///
    /// Capacities, mode, feedback and log files are replaced. The config's
    /// commands are appended after those already registered. Subscriptions
    /// are kept.
    pub fn apply_config(&mut self, mut config: ConsoleConfig) {
        let commands = std::mem::take(&mut config.commands);

        self.history.set_capacity(config.history_capacity.into());
        self.debug.set_capacity(config.debug_capacity.into());
        self.feedback = config.feedback;
        self.history_file = LogFile::from_config(&config.history_log);
        self.debug_file = LogFile::from_config(&config.debug_log);
        self.mode = if config.debug_mode { ConsoleMode::Debug } else { ConsoleMode::Normal };

        self.settings = config;

        let count = commands.len();
        self.registry.extend(commands);
        if count > 0 {
            info!("Console: registered {} commands ({} total)", count, self.registry.len());
        }
        self.render();
    }

    /// The settings last applied, without the command table.
    ///
    /// Mode and feedback changed at runtime are not reflected.
    pub fn settings(&self) -> &ConsoleConfig {
        &self.settings
    }

    /// Submit a line of input, as typed by the user.
    ///
    /// The raw line is always recorded in the history first, even if it turns
    /// out to be invalid.
    pub fn submit(&mut self, line: &str) -> Outcome {
        self.add(line);

        if self.registry.is_empty() {
            self.add(NO_COMMANDS_MESSAGE);
            self.render();
            return Outcome::Rejected;
        }

        let tokens = tokenize(line);
        match parse_line(&tokens, &self.registry) {
            Action::Clear => {
                self.clear();
                Outcome::Cleared
            }
            Action::Help(text) => {
                self.add(&text);
                self.render();
                Outcome::Help
            }
            Action::Invalid => {
                self.add(INVALID_COMMAND_MESSAGE);
                self.render();
                Outcome::Rejected
            }
            Action::Dispatch(dispatch) => {
                let called = self.channels.invoke(&dispatch);
                debug!("Console: '{}' reached {} subscribers", dispatch, called);

                self.apply_color(&dispatch);
                if self.feedback {
                    self.add(&feedback_line(&dispatch));
                }
                self.render();
                Outcome::Accepted(dispatch)
            }
        }
    }

    /// Record a message in the debug log.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();

        let failed = self.debug_file.as_ref().and_then(|file| file.append(&message).err());
        if let Some(e) = failed {
            warn!("Console: disabling debug log file: {}", e);
            self.debug_file = None;
        }

        self.debug.push(message.clone());
        self.queue_output(ConsoleOutputEvent::debug(message));
        if self.mode == ConsoleMode::Debug {
            self.render();
        }
    }

    /// Clear the active buffer and the rendered text.
    pub fn clear(&mut self) {
        match self.mode {
            ConsoleMode::Normal => self.history.clear(),
            ConsoleMode::Debug => self.debug.clear(),
        }
        self.text.clear();
    }

    /// Rebuild the rendered text from the active buffer.
    pub fn render(&mut self) {
        self.text = self.active_buffer().render();
    }

    /// Get the rendered text shown by the view.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the current mode.
    #[inline]
    pub fn mode(&self) -> ConsoleMode {
        self.mode
    }

    /// Switch mode and re-render.
    pub fn set_mode(&mut self, mode: ConsoleMode) {
        self.mode = mode;
        self.render();
    }

    /// Switch to the other mode and re-render.
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// Enable or disable command feedback.
    pub fn set_feedback(&mut self, enabled: bool) {
        self.feedback = enabled;
    }

    /// Get the command history buffer.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Get the debug log buffer.
    pub fn debug_log(&self) -> &HistoryBuffer {
        &self.debug
    }

    /// Get the buffer shown in the current mode.
    pub fn active_buffer(&self) -> &HistoryBuffer {
        match self.mode {
            ConsoleMode::Normal => &self.history,
            ConsoleMode::Debug => &self.debug,
        }
    }

    /// Get the command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Register a command after those already present.
    pub fn register(&mut self, definition: CommandDefinition) -> bool {
        self.registry.register(definition)
    }

    /// Get the current view colors.
    pub fn colors(&self) -> ConsoleColors {
        self.colors
    }

    /// Get the typed channels.
    pub fn channels(&self) -> &ConsoleChannels {
        &self.channels
    }

    /// Subscribe to trigger commands.
    pub fn on_trigger<F>(&self, mut subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs) + Send + 'static,
    {
        self.channels.trigger.subscribe(move |args, ()| subscriber(args))
    }

    /// Subscribe to two-component vector commands.
    pub fn on_vec2<F>(&self, subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs, Vec2) + Send + 'static,
    {
        self.channels.vec2.subscribe(subscriber)
    }

    /// Subscribe to three-component vector commands.
    pub fn on_vec3<F>(&self, subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs, Vec3) + Send + 'static,
    {
        self.channels.vec3.subscribe(subscriber)
    }

    /// Subscribe to four-component vector commands.
    pub fn on_vec4<F>(&self, subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs, Vec4) + Send + 'static,
    {
        self.channels.vec4.subscribe(subscriber)
    }

    /// Subscribe to float commands.
    pub fn on_float<F>(&self, subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs, f32) + Send + 'static,
    {
        self.channels.float.subscribe(subscriber)
    }

    /// Subscribe to integer commands.
    pub fn on_int<F>(&self, subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs, i32) + Send + 'static,
    {
        self.channels.int.subscribe(subscriber)
    }

    /// Take the lines appended since the last call, oldest first.
    pub fn drain_output(&mut self) -> impl Iterator<Item = ConsoleOutputEvent> + '_ {
        self.pending_output.drain(..)
    }

    /// Append a timestamped line to the history and its log file.
    fn add(&mut self, entry: &str) {
        let line = format!("{} {}", clock_stamp(), entry);

        let failed = self.history_file.as_ref().and_then(|file| file.append(entry).err());
        if let Some(e) = failed {
            warn!("Console: disabling history log file: {}", e);
            self.history_file = None;
        }

        self.history.push(line.clone());
        self.queue_output(ConsoleOutputEvent::history(line));
    }

    fn queue_output(&mut self, output: ConsoleOutputEvent) {
        self.pending_output.push_back(output);
        // Nobody may be draining; never hold more than both buffers can show.
        let limit = self.history.capacity() + self.debug.capacity();
        while self.pending_output.len() > limit {
            self.pending_output.pop_front();
        }
    }

    fn apply_color(&mut self, dispatch: &Dispatch) {
        let Dispatch::Vec4(args, rgba) = dispatch else {
            return;
        };
        if args.keyword() != COLOR_KEYWORD {
            return;
        }

        let color = Color::srgba(rgba.x, rgba.y, rgba.z, rgba.w);
        match args.subtarget() {
            Some(COLOR_BACKGROUND) => self.colors.background = color,
            Some(COLOR_TEXT) => self.colors.text = color,
            _ => {}
        }
    }
}

fn feedback_line(dispatch: &Dispatch) -> String {
    match dispatch.payload() {
        Some(payload) => format!("Command executed ({}) with args {}.", dispatch.args(), payload),
        None => format!("Command executed ({}).", dispatch.args()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogFileConfig, UNKNOWN_HELP_MESSAGE};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn commands() -> Vec<CommandDefinition> {
        vec![
            CommandDefinition::new("fly", CommandKind::Trigger)
                .alias("noclip")
                .description("Toggle flying"),
            CommandDefinition::new("teleport", CommandKind::Vector).description("Move a target"),
            CommandDefinition::new("speed", CommandKind::Float).description("Set speed"),
            CommandDefinition::new("lives", CommandKind::Int).description("Set lives"),
            color_command(),
        ]
    }

    fn console() -> DevConsole {
        DevConsole::new(ConsoleConfig::default().history_capacity(50).commands(commands()))
    }

    /// History entries with the `[HH:mm:ss] ` prefix removed.
    fn history(console: &DevConsole) -> Vec<String> {
        console
            .history()
            .iter()
            .map(|entry| entry.split_once("] ").map(|(_, rest)| rest).unwrap_or(entry).to_string())
            .collect()
    }

    #[test]
    fn test_raw_line_recorded_before_parsing() {
        let mut console = console();
        console.submit("Unknown 1 2");
        assert_eq!(history(&console), vec!["Unknown 1 2", INVALID_COMMAND_MESSAGE]);
        assert!(console.history().iter().all(|e| e.starts_with('[')));
    }

    #[test]
    fn test_unknown_command_rejected_once_without_dispatch() {
        let mut console = console();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = console.on_trigger(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(console.submit("unknown 1 2"), Outcome::Rejected);
        let invalid = history(&console).iter().filter(|e| *e == INVALID_COMMAND_MESSAGE).count();
        assert_eq!(invalid, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_registry_reports_diagnostic() {
        let mut console = DevConsole::default();
        assert_eq!(console.submit("fly"), Outcome::Rejected);
        assert_eq!(history(&console), vec!["fly", NO_COMMANDS_MESSAGE]);
    }

    #[test]
    fn test_empty_line_is_invalid() {
        let mut console = console();
        assert_eq!(console.submit(""), Outcome::Rejected);
        assert_eq!(history(&console).last().map(String::as_str), Some(INVALID_COMMAND_MESSAGE));
    }

    #[test]
    fn test_empty_line_never_reaches_blank_keyword() {
        let mut console = DevConsole::new(
            ConsoleConfig::default().command(CommandDefinition::new("  ", CommandKind::Trigger)),
        );
        assert_eq!(console.submit(""), Outcome::Rejected);
        assert_eq!(console.submit("   "), Outcome::Rejected);
    }

    #[test]
    fn test_trigger_dispatch() {
        let mut console = console();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = console.on_trigger(move |args| {
            sink.lock().unwrap().push(args.clone());
        });

        assert!(console.submit("NoClip").is_accepted());
        assert!(console.submit("fly player").is_accepted());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![DispatchArgs::new("fly"), DispatchArgs::with_subtarget("fly", "player")]
        );
    }

    #[test]
    fn test_vector_dispatch() {
        let mut console = console();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let _sub = console.on_vec2(move |args, v| {
            *sink.lock().unwrap() = Some((args.clone(), v));
        });

        let outcome = console.submit("teleport 1.0 2.5 3.0");
        assert!(outcome.is_accepted());
        assert_eq!(
            *seen.lock().unwrap(),
            Some((DispatchArgs::with_subtarget("teleport", "1.0"), Vec2::new(2.5, 3.0)))
        );
    }

    #[test]
    fn test_float_success_is_not_reported_invalid() {
        let mut console = console();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = console.on_float(move |args, v| {
            sink.lock().unwrap().push((args.clone(), v));
        });

        assert!(console.submit("speed 4").is_accepted());
        assert!(console.submit("speed player 1.5").is_accepted());
        assert!(!history(&console).iter().any(|e| e == INVALID_COMMAND_MESSAGE));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (DispatchArgs::new("speed"), 4.0),
                (DispatchArgs::with_subtarget("speed", "player"), 1.5)
            ]
        );
    }

    #[test]
    fn test_int_failure_is_reported_invalid() {
        let mut console = console();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = console.on_int(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(console.submit("lives many"), Outcome::Rejected);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(history(&console).last().map(String::as_str), Some(INVALID_COMMAND_MESSAGE));
    }

    #[test]
    fn test_dropped_subscription_is_not_called() {
        let mut console = console();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sub = console.on_int(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        console.submit("lives 3");
        drop(sub);
        console.submit("lives 4");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_help_lists_visible_commands() {
        let mut console = console();
        assert_eq!(console.submit("help"), Outcome::Help);
        let last = history(&console).pop().unwrap();
        assert_eq!(last, console.registry().help_text());
        assert_eq!(last.matches("fly - ").count(), 1);

        console.submit("help walk");
        assert_eq!(history(&console).pop().unwrap(), UNKNOWN_HELP_MESSAGE);

        console.submit("help NOCLIP");
        assert_eq!(history(&console).pop().unwrap(), "fly - Toggle flying");
    }

    #[test]
    fn test_clear_in_normal_mode() {
        let mut console = console();
        console.log("debug line");
        console.submit("fly");
        assert_eq!(console.submit("clear"), Outcome::Cleared);

        assert!(console.history().is_empty());
        assert_eq!(console.text(), "");
        assert_eq!(
            console.debug_log().iter().collect::<Vec<_>>(),
            vec![STARTUP_LOG_MESSAGE, "debug line"]
        );
    }

    #[test]
    fn test_clear_in_debug_mode() {
        let mut console = console();
        console.submit("fly");
        console.set_mode(ConsoleMode::Debug);
        console.log("debug line");

        assert_eq!(console.submit("clear"), Outcome::Cleared);
        assert!(console.debug_log().is_empty());
        assert_eq!(console.text(), "");
        assert_eq!(history(&console), vec!["fly", "clear"]);
    }

    #[test]
    fn test_render_follows_mode() {
        let mut console = console();
        console.submit("fly");
        assert!(console.text().ends_with("] fly"));

        console.toggle_mode();
        assert_eq!(console.mode(), ConsoleMode::Debug);
        assert_eq!(console.text(), STARTUP_LOG_MESSAGE);

        console.log("more");
        assert_eq!(console.text(), format!("{}\nmore", STARTUP_LOG_MESSAGE));
    }

    #[test]
    fn test_rendered_history_contains_every_submission() {
        let mut console = console();
        let lines = ["fly", "speed 2", "Bogus Input", "teleport a 1 2"];
        for line in lines {
            console.submit(line);
        }
        for line in lines {
            assert!(console.text().contains(&format!("] {}", line)), "missing {line}");
        }
    }

    #[test]
    fn test_history_capacity_evicts_oldest() {
        let mut console = DevConsole::new(
            ConsoleConfig::default().history_capacity(4).commands(commands()),
        );
        for i in 0..5 {
            console.submit(&format!("lives {i}"));
        }
        assert_eq!(console.history().len(), 4);
        assert_eq!(history(&console), vec!["lives 1", "lives 2", "lives 3", "lives 4"]);
    }

    #[test]
    fn test_feedback_lines() {
        let mut console = DevConsole::new(
            ConsoleConfig::default().history_capacity(50).feedback(true).commands(commands()),
        );

        console.submit("fly");
        assert_eq!(history(&console).pop().unwrap(), "Command executed (fly).");

        console.submit("fly player");
        assert_eq!(history(&console).pop().unwrap(), "Command executed (fly params: player).");

        console.submit("lives player 3");
        assert_eq!(
            history(&console).pop().unwrap(),
            "Command executed (lives params: player) with args 3."
        );

        console.submit("lives bogus");
        assert_eq!(history(&console).pop().unwrap(), INVALID_COMMAND_MESSAGE);
    }

    #[test]
    fn test_color_command_sets_colors() {
        let mut console = console();
        console.submit("color bg 0 0 1 1");
        console.submit("Color TEXT 1 1 0 1");

        assert_eq!(console.colors().background, Color::srgba(0.0, 0.0, 1.0, 1.0));
        assert_eq!(console.colors().text, Color::srgba(1.0, 1.0, 0.0, 1.0));

        let before = console.colors();
        console.submit("color border 1 1 1 1");
        assert_eq!(console.colors(), before);
    }

    #[test]
    fn test_drain_output_streams() {
        let mut console = console();
        let _ = console.drain_output().count();

        console.submit("fly");
        console.log("hello");
        let output: Vec<_> = console.drain_output().collect();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].stream, OutputStream::History);
        assert!(output[0].message.ends_with("] fly"));
        assert_eq!(output[1].stream, OutputStream::Debug);
        assert_eq!(output[1].message, "hello");
        assert_eq!(console.drain_output().count(), 0);
    }

    #[test]
    fn test_pending_output_is_bounded() {
        let mut console = DevConsole::new(
            ConsoleConfig::default().history_capacity(2).debug_capacity(2).commands(commands()),
        );
        for _ in 0..20 {
            console.log("spam");
        }
        assert_eq!(console.drain_output().count(), 4);
    }

    #[test]
    fn test_apply_config_keeps_subscriptions() {
        let mut console = DevConsole::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = console.on_trigger(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        console.apply_config(ConsoleConfig::default().commands(commands()).debug_mode(true));
        assert_eq!(console.mode(), ConsoleMode::Debug);
        assert!(console.submit("fly").is_accepted());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_files_mirror_streams() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut console = DevConsole::new(
            ConsoleConfig::default()
                .history_log(LogFileConfig::enabled_in(temp.path(), "history_log.txt"))
                .debug_log(LogFileConfig::enabled_in(temp.path(), "debug_log.txt"))
                .commands(commands()),
        );

        console.submit("fly");
        console.log("debug entry");

        let history_path = LogFile::new(temp.path(), "history_log.txt").current_path();
        let history_file = std::fs::read_to_string(history_path).unwrap();
        assert!(history_file.lines().any(|l| l.ends_with("] fly")));
        assert!(!history_file.contains("] ["));

        let debug_path = LogFile::new(temp.path(), "debug_log.txt").current_path();
        let debug_file = std::fs::read_to_string(debug_path).unwrap();
        let lines: Vec<_> = debug_file.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!("] {}", STARTUP_LOG_MESSAGE)));
        assert!(lines[1].ends_with("] debug entry"));
    }

    #[test]
    fn test_failing_log_files_are_disabled() {
        let temp = tempfile::TempDir::new().unwrap();
        let blocker = temp.path().join("not_a_dir");
        std::fs::write(&blocker, "file").unwrap();

        let mut console = DevConsole::new(
            ConsoleConfig::default()
                .history_log(LogFileConfig::enabled_in(&blocker, "history_log.txt"))
                .debug_log(LogFileConfig::enabled_in(&blocker, "debug_log.txt"))
                .commands(commands()),
        );
        assert!(console.debug_file.is_none());

        assert!(console.submit("fly").is_accepted());
        assert!(console.history_file.is_none());
        assert_eq!(history(&console), vec!["fly"]);

        // Once the path becomes writable nothing is retried
        std::fs::remove_file(&blocker).unwrap();
        std::fs::create_dir(&blocker).unwrap();
        console.submit("fly");
        console.log("after failure");
        assert_eq!(std::fs::read_dir(&blocker).unwrap().count(), 0);
        assert_eq!(console.debug_log().last(), Some("after failure"));
    }

    #[test]
    fn test_settings_exclude_commands() {
        let console = DevConsole::new(
            ConsoleConfig::default().history_capacity(20).feedback(true).commands(commands()),
        );
        assert_eq!(console.settings().history_capacity, 20);
        assert!(console.settings().feedback);
        assert!(console.settings().commands.is_empty());
        assert_eq!(console.registry().len(), commands().len());
    }
}
