//! Engine log capture into the console's debug log.
//!
//! Install [`console_log_layer`] through
//! [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer) and every
//! `tracing` event at or above [`LogCaptureFilter::min_level`] lands in the
//! [`DevConsole`] debug buffer as `"LEVEL message"`.

use std::sync::mpsc;

use bevy::log::{BoxedLayer, Level};
use bevy::prelude::*;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::field::Visit;

use crate::core::DevConsole;

/// A function that implements log capture for the developer console via
/// [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
pub fn console_log_layer(app: &mut App) -> Option<BoxedLayer> {
    Some(Box::new(create_capture_layer(app)))
}

fn create_capture_layer(app: &mut App) -> LogCaptureLayer {
    let (sender, receiver) = mpsc::channel();
    app.insert_non_send_resource(CapturedLogs(receiver));
    app.init_resource::<LogCaptureFilter>();
    app.add_systems(PostUpdate, forward_captured_logs);

    LogCaptureLayer { sender }
}

/// Which captured events reach the debug log.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LogCaptureFilter {
    /// Least severe level that is kept.
    pub min_level: Level,
}

impl Default for LogCaptureFilter {
    fn default() -> Self {
        Self {
            min_level: Level::INFO,
        }
    }
}

impl LogCaptureFilter {
    /// Whether an event at `level` passes the filter.
    pub fn accepts(&self, level: Level) -> bool {
        // tracing orders levels by verbosity, so ERROR is the smallest
        level <= self.min_level
    }
}

/// One captured event.
#[derive(Debug, Clone)]
struct CapturedLog {
    level: Level,
    message: String,
}

impl CapturedLog {
    fn line(&self) -> String {
        format!("{} {}", self.level, self.message)
    }
}

/// Receiving end of the capture layer, drained once per frame.
struct CapturedLogs(mpsc::Receiver<CapturedLog>);

/// Moves captured events into the console debug log.
fn forward_captured_logs(
    receiver: NonSend<CapturedLogs>,
    filter: Res<LogCaptureFilter>,
    console: Option<ResMut<DevConsole>>,
) {
    let Some(mut console) = console else {
        // Drain anyway so the channel does not grow before the console exists
        receiver.0.try_iter().for_each(drop);
        return;
    };

    for captured in receiver.0.try_iter() {
        if filter.accepts(captured.level) {
            console.log(captured.line());
        }
    }
}

/// A [`Layer`] that sends log events to [`CapturedLogs`].
struct LogCaptureLayer {
    sender: mpsc::Sender<CapturedLog>,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(message) = message {
            let _ = self.sender.send(CapturedLog {
                level: *event.metadata().level(),
                message,
            });
        }
    }
}

/// A [`Visit`]or that extracts the `message` field of an event.
struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}
