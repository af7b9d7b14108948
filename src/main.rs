//! The refreshed build: menu scene, scoring, sound effects, pipe expiry,
//! and a persistent best score.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use flappy::animation::AnimationPlugin;
use flappy::assets::LoadingPlugin;
use flappy::audio::AudioPlugin;
use flappy::collision::CollisionPlugin;
use flappy::config::{GameConfig, TICK_RATE, WINDOW_HEIGHT, WINDOW_WIDTH};
use flappy::menu::MenuPlugin;
use flappy::physics::PhysicsPlugin;
use flappy::pipes::PipePlugin;
use flappy::player::PlayerPlugin;
use flappy::save_load::SaveLoadPlugin;
use flappy::score::ScorePlugin;
use flappy::world::WorldPlugin;
use flappy::GameState;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Flappy".into(),
                        resolution: WindowResolution::new(
                            WINDOW_WIDTH as u32,
                            WINDOW_HEIGHT as u32,
                        ),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
        .insert_resource(GameConfig::arcade())
        .init_state::<GameState>()
        .add_plugins((
            LoadingPlugin,
            SaveLoadPlugin,
            AnimationPlugin,
            PhysicsPlugin,
            WorldPlugin,
            PlayerPlugin,
            PipePlugin,
            CollisionPlugin,
            ScorePlugin,
            AudioPlugin,
            MenuPlugin,
        ))
        .run();
}
