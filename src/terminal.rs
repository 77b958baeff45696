//! Terminal backend for headless/dedicated server console.
//!
//! Lines typed on stdin are submitted to the console, and history output is
//! echoed to stdout.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{ConsoleInputEvent, ConsoleOutputEvent, OutputStream};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(Update, (read_stdin, write_stdout));
    }
}

/// Configuration for terminal behavior.
#[derive(Resource, Debug, Clone)]
pub struct TerminalConfig {
    /// Echo debug log lines as well as history.
    pub show_debug: bool,
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            show_debug: false,
            colored: false,
        }
    }
}

impl TerminalConfig {
    /// Whether lines of `stream` are printed.
    pub fn shows(&self, stream: OutputStream) -> bool {
        match stream {
            OutputStream::History => true,
            OutputStream::Debug => self.show_debug,
        }
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        let handle = stdin.lock();

        // Blank lines are forwarded too; the console records them as invalid
        for line in handle.lines().map_while(Result::ok) {
            if sender.send(line).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else {
        return;
    };
    while let Ok(line) = rx.try_recv() {
        events.write(ConsoleInputEvent::new(line));
    }
}

fn write_stdout(mut events: MessageReader<ConsoleOutputEvent>, config: Res<TerminalConfig>) {
    let mut stdout = io::stdout().lock();
    for event in events.read().filter(|event| config.shows(event.stream)) {
        let _ = if config.colored {
            writeln!(stdout, "{}{}\x1b[0m", stream_color(event.stream), event.message)
        } else {
            writeln!(stdout, "{}", event.message)
        };
    }
    let _ = stdout.flush();
}

fn stream_color(stream: OutputStream) -> &'static str {
    match stream {
        OutputStream::History => "\x1b[0m",
        OutputStream::Debug => "\x1b[90m",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shows_history_only() {
        let config = TerminalConfig::default();
        assert!(config.shows(OutputStream::History));
        assert!(!config.shows(OutputStream::Debug));

        let verbose = TerminalConfig {
            show_debug: true,
            ..default()
        };
        assert!(verbose.shows(OutputStream::Debug));
    }
}
