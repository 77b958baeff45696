//! Minimal headless console example.
//!
//! Demonstrates driving the console programmatically without any UI.
//! Useful for testing or custom UI implementations.
//!
//! Run with: `cargo run --example minimal --no-default-features`

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_typed_console::prelude::*;

fn main() {
    let config = ConsoleConfig::default()
        .feedback(true)
        .command(CommandDefinition::new("greet", CommandKind::Trigger).description("Greet someone"))
        .command(
            CommandDefinition::new("gravity", CommandKind::Float)
                .alias("g")
                .description("Set world gravity"),
        );

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(ConsolePlugin::new(config))
        .add_systems(Startup, setup)
        .add_systems(Update, send_test_commands.run_if(run_once))
        .add_systems(PostUpdate, (process_commands, process_outputs, exit_after_first_frames))
        .run();
}

/// Keeps the closure subscription alive for the whole run.
#[derive(Resource)]
struct GreetSubscription(#[allow(dead_code)] Subscription);

fn setup(mut commands: Commands, console: Res<DevConsole>) {
    let subscription = console.on_trigger(|args| {
        let name = args.subtarget().unwrap_or("world");
        println!("Hello, {}!", name);
    });
    commands.insert_resource(GreetSubscription(subscription));

    println!("Console initialized. Registered: greet, gravity");
}

/// Send some test commands programmatically.
fn send_test_commands(mut events: MessageWriter<ConsoleInputEvent>) {
    println!("\n--- Sending test commands ---");

    events.write(ConsoleInputEvent::new("help"));
    events.write(ConsoleInputEvent::new("greet developer"));
    events.write(ConsoleInputEvent::new("g 9.8"));
    events.write(ConsoleInputEvent::new("gravity world 1.6"));
    events.write(ConsoleInputEvent::new("gravity heavy"));
}

/// React to accepted commands through messages.
fn process_commands(mut events: MessageReader<ConsoleCommandEvent>) {
    for event in events.read() {
        if let Dispatch::Float(args, value) = &event.dispatch {
            println!("gravity for {} set to {}", args.subtarget().unwrap_or("everyone"), value);
        }
    }
}

/// Print console output events.
fn process_outputs(mut events: MessageReader<ConsoleOutputEvent>) {
    for event in events.read() {
        let prefix = match event.stream {
            OutputStream::History => "[>]",
            OutputStream::Debug => "[DEBUG]",
        };
        println!("{} {}", prefix, event.message);
    }
}

fn exit_after_first_frames(mut frames: Local<u32>, mut exit: MessageWriter<AppExit>) {
    *frames += 1;
    if *frames > 2 {
        exit.write(AppExit::Success);
    }
}
