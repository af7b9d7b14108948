//! The playfield: camera, backdrop, and the endlessly scrolling ground
//! strip.

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::collision::run_alive;
use crate::config::{
    GameConfig, GROUND_HEIGHT, GROUND_Y, WINDOW_HEIGHT, WINDOW_WIDTH, Z_BACKGROUND, Z_GROUND,
};
use crate::physics::{Hitbox, Velocity};
use crate::{GameState, SceneTag, SimSet};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(GameState::Playing), spawn_playfield)
            .add_systems(
                FixedUpdate,
                wrap_ground_system
                    .in_set(SimSet::Control)
                    .run_if(in_state(GameState::Playing).and(run_alive)),
            );
    }
}

/// Scrolling ground strip tile.
#[derive(Component)]
pub struct GroundTile;

/// Anything that ends the run when the player touches it.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Obstacle {
    Ground,
    Pipe,
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_playfield(mut commands: Commands, config: Res<GameConfig>, assets: Res<GameAssets>) {
    spawn_backdrop(&mut commands, &config, &assets, SceneTag::Game);
}

/// Background image plus the two ground tiles, tagged for `scene`. Two
/// full-width tiles, one screen apart, cover the floor at every point of
/// the wrap cycle.
pub fn spawn_backdrop(
    commands: &mut Commands,
    config: &GameConfig,
    assets: &GameAssets,
    scene: SceneTag,
) {
    commands.spawn((
        Sprite {
            image: assets.background.clone(),
            custom_size: Some(Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, Z_BACKGROUND),
        scene,
    ));

    for x in [0.0, WINDOW_WIDTH] {
        commands.spawn((
            GroundTile,
            Obstacle::Ground,
            Velocity(Vec2::new(-config.scroll_speed, 0.0)),
            Hitbox(Vec2::new(WINDOW_WIDTH, GROUND_HEIGHT)),
            Sprite {
                image: assets.ground.clone(),
                custom_size: Some(Vec2::new(WINDOW_WIDTH, GROUND_HEIGHT)),
                ..default()
            },
            Transform::from_xyz(x, GROUND_Y, Z_GROUND),
            scene,
        ));
    }
}

/// Repositions a ground tile a full screen to the right once it has
/// scrolled a full screen off to the left.
fn wrap_ground_system(mut tiles: Query<&mut Transform, With<GroundTile>>) {
    for mut transform in &mut tiles {
        if transform.translation.x < -WINDOW_WIDTH {
            transform.translation.x = WINDOW_WIDTH;
        }
    }
}
