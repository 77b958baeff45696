//! Egui console example.
//!
//! Demonstrates the egui-based developer console with typed commands.
//!
//! Run with: `cargo run --example egui`
//!
//! Controls:
//! - Press ` (grave/tilde) to toggle console
//! - Press Enter to submit commands
//! - Press ArrowUp/ArrowDown to recall submitted lines
//!
//! Try these commands:
//! - `help` - List all commands
//! - `spawn box 100 50` - Spawn a sprite at a position
//! - `despawn` - Despawn all demo entities
//! - `speed 400` - Change movement speed
//! - `color bg 0.1 0 0.2 0.9` - Change the console background
//! - `clear` - Clear the console

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_typed_console::prelude::*;

fn main() {
    let config = ConsoleConfig::default()
        .feedback(true)
        .commands([
            CommandDefinition::new("spawn", CommandKind::Vector).description("Spawn a box at x y"),
            CommandDefinition::new("despawn", CommandKind::Trigger).description("Despawn all demo entities"),
            CommandDefinition::new("speed", CommandKind::Float)
                .alias("player_speed")
                .description("Player movement speed"),
            CommandDefinition::new("noclip", CommandKind::Trigger).hidden(),
            color_command(),
        ]);

    App::new()
        .add_plugins(DefaultPlugins.set(LogPlugin {
            custom_layer: bevy_typed_console::logging::console_log_layer,
            ..default()
        }))
        .add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(ConsolePlugin::new(config))
        .init_resource::<PlayerSpeed>()
        .add_systems(Startup, setup)
        .add_systems(Update, handle_commands)
        .run();
}

/// Marker for demo entities.
#[derive(Component)]
struct DemoEntity;

#[derive(Resource)]
struct PlayerSpeed(f32);

impl Default for PlayerSpeed {
    fn default() -> Self {
        Self(200.0)
    }
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("Press ` to open console. Try: help, spawn box 100 50, speed 400");
}

fn handle_commands(
    mut commands: Commands,
    mut events: MessageReader<ConsoleCommandEvent>,
    mut speed: ResMut<PlayerSpeed>,
    demo: Query<Entity, With<DemoEntity>>,
) {
    for event in events.read() {
        match &event.dispatch {
            Dispatch::Vec2(_, position) if event.keyword() == "spawn" => {
                commands.spawn((
                    Sprite {
                        color: Color::srgb(0.3, 0.7, 0.3),
                        custom_size: Some(Vec2::new(50.0, 50.0)),
                        ..default()
                    },
                    Transform::from_translation(position.extend(0.0)),
                    DemoEntity,
                ));
                info!("Spawned entity at {}", position);
            }
            Dispatch::Trigger(_) if event.keyword() == "despawn" => {
                let count = demo.iter().count();
                for entity in &demo {
                    commands.entity(entity).despawn();
                }
                info!("Despawned {} entities", count);
            }
            Dispatch::Float(_, value) if event.keyword() == "speed" => {
                speed.0 = value.clamp(50.0, 1000.0);
                info!("player_speed = {}", speed.0);
            }
            Dispatch::Trigger(_) if event.keyword() == "noclip" => {
                info!("Noclip toggled");
            }
            _ => {}
        }
    }
}
