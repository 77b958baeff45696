//! Terminal console example.
//!
//! Demonstrates the console with stdin/stdout for headless applications
//! like dedicated servers.
//!
//! Run with: `cargo run --example terminal --no-default-features --features terminal`
//!
//! Commands:
//! - `help` - List available commands
//! - `maxplayers 16` - Set the player limit
//! - `spawn bot 0 0 10` - Spawn a bot at a position
//! - `status` - Show server status
//! - `quit` - Exit the application

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_typed_console::prelude::*;

fn main() {
    println!("=== Terminal Console Example ===");
    println!("Type commands and press Enter. Type 'quit' to exit.");
    println!();

    // Ensure output is flushed before starting the app
    use std::io::Write;
    let _ = std::io::stdout().flush();

    let config = ConsoleConfig::default()
        .feedback(true)
        .commands([
            CommandDefinition::new("maxplayers", CommandKind::Int)
                .alias("sv_maxplayers")
                .description("Maximum number of players"),
            CommandDefinition::new("spawn", CommandKind::Vector).description("Spawn at x y z"),
            CommandDefinition::new("status", CommandKind::Trigger).description("Show server status"),
            CommandDefinition::new("quit", CommandKind::Trigger)
                .alias("exit")
                .description("Exit the application"),
        ]);

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(ConsolePlugin::new(config))
        .init_resource::<ServerState>()
        .add_systems(Update, handle_commands)
        .run();
}

#[derive(Resource)]
struct ServerState {
    max_players: i32,
    spawned: Vec<Vec3>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            max_players: 32,
            spawned: Vec::new(),
        }
    }
}

fn handle_commands(
    mut events: MessageReader<ConsoleCommandEvent>,
    mut state: ResMut<ServerState>,
    mut exit: MessageWriter<AppExit>,
) {
    for event in events.read() {
        match (&event.dispatch, event.keyword()) {
            (Dispatch::Int(_, value), "maxplayers") => {
                state.max_players = (*value).clamp(1, 64);
            }
            (Dispatch::Vec3(args, position), "spawn") => {
                state.spawned.push(*position);
                println!("Spawned {} at {}", args.subtarget().unwrap_or("entity"), position);
            }
            (Dispatch::Trigger(_), "status") => {
                println!("=== Status ===");
                println!("Max Players: {}", state.max_players);
                println!("Spawned: {}", state.spawned.len());
            }
            (Dispatch::Trigger(_), "quit") => {
                exit.write(AppExit::Success);
            }
            _ => {}
        }
    }
}
