//! Obstacle pipes: a wall-clock spawner that fires while the game scene
//! is live, and the pair geometry around a randomized gap.

use bevy::prelude::*;
use rand::thread_rng;

use crate::assets::GameAssets;
use crate::config::{
    pipe_pair_centers, sample_gap_offset, GameConfig, PIPE_SIZE, PIPE_SPAWN_X, Z_PIPE,
};
use crate::physics::{Hitbox, Ttl, Velocity};
use crate::world::Obstacle;
use crate::{GameState, SceneTag};

pub struct PipePlugin;

impl Plugin for PipePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), start_spawner)
            .add_systems(OnExit(GameState::Playing), stop_spawner)
            .add_systems(
                Update,
                spawn_pipes_system
                    .run_if(in_state(GameState::Playing).and(resource_exists::<PipeSpawnTimer>)),
            );
    }
}

/// Wall-clock trigger for new pipe pairs. Exists only while the game
/// scene is live; the collision handler removes it so no pipes appear
/// after a death.
#[derive(Resource)]
pub struct PipeSpawnTimer(pub Timer);

/// One half of an obstacle pair.
#[derive(Component)]
pub struct Pipe;

/// Marks the pipe whose x-crossing of the player scores a point. One per
/// pair, on the pipe above the gap.
#[derive(Component)]
pub struct ScoreGate;

fn start_spawner(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(PipeSpawnTimer(Timer::new(
        config.spawn_interval,
        TimerMode::Repeating,
    )));
}

fn stop_spawner(mut commands: Commands) {
    commands.remove_resource::<PipeSpawnTimer>();
}

fn spawn_pipes_system(
    mut commands: Commands,
    mut timer: ResMut<PipeSpawnTimer>,
    time: Res<Time>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }
    let offset = sample_gap_offset(&mut thread_rng(), &config);
    spawn_pipe_pair(&mut commands, &config, &assets, offset);
}

/// Spawns the top/bottom pair for a gap whose top edge sits `offset`
/// below the top of the screen.
pub fn spawn_pipe_pair(
    commands: &mut Commands,
    config: &GameConfig,
    assets: &GameAssets,
    offset: f32,
) {
    let (top_y, bottom_y) = pipe_pair_centers(offset);
    spawn_pipe(commands, config, assets.pipe_down.clone(), top_y, true);
    spawn_pipe(commands, config, assets.pipe_up.clone(), bottom_y, false);
}

fn spawn_pipe(
    commands: &mut Commands,
    config: &GameConfig,
    image: Handle<Image>,
    y: f32,
    gate: bool,
) {
    let mut pipe = commands.spawn((
        Pipe,
        Obstacle::Pipe,
        Velocity(Vec2::new(-config.scroll_speed, 0.0)),
        Hitbox(PIPE_SIZE),
        Sprite {
            image,
            custom_size: Some(PIPE_SIZE),
            ..default()
        },
        Transform::from_xyz(PIPE_SPAWN_X, y, Z_PIPE),
        SceneTag::Game,
    ));
    if let Some(ticks) = config.pipe_ttl {
        pipe.insert(Ttl(ticks));
    }
    if gate {
        pipe.insert(ScoreGate);
    }
}
