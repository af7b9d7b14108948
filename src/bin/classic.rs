//! The first iteration: no menu, no score, no sound. The game starts as
//! soon as the images load, and the screen freezes where the run ends.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use flappy::animation::AnimationPlugin;
use flappy::assets::LoadingPlugin;
use flappy::collision::CollisionPlugin;
use flappy::config::{GameConfig, TICK_RATE, WINDOW_HEIGHT, WINDOW_WIDTH};
use flappy::physics::PhysicsPlugin;
use flappy::pipes::PipePlugin;
use flappy::player::PlayerPlugin;
use flappy::world::WorldPlugin;
use flappy::GameState;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Flappy (classic)".into(),
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
        .insert_resource(GameConfig::classic())
        .init_state::<GameState>()
        .add_plugins((
            LoadingPlugin,
            AnimationPlugin,
            PhysicsPlugin,
            WorldPlugin,
            PlayerPlugin,
            PipePlugin,
            CollisionPlugin,
        ))
        .run();
}
