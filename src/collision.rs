//! Overlap detection between the player and the obstacle boxes, and the
//! transition out of `Playing` that it triggers.

use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::prelude::*;

use crate::audio::{GameAudio, SoundEffect};
use crate::physics::Hitbox;
use crate::pipes::PipeSpawnTimer;
use crate::player::Player;
use crate::score::Score;
use crate::world::Obstacle;
use crate::{GameState, SimSet};

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), reset_run_guard)
            .add_systems(
                FixedUpdate,
                collision_system
                    .in_set(SimSet::Settle)
                    .run_if(in_state(GameState::Playing).and(run_alive)),
            );
    }
}

/// Inserted on the tick the run ends. The state change only applies at
/// the next frame boundary, and several simulation ticks can run before
/// then; this guard freezes them so the death effects fire once and the
/// final positions stay put.
#[derive(Resource)]
struct RunOver;

/// Run condition for the simulation: true until a collision ends the run.
pub fn run_alive(guard: Option<Res<RunOver>>) -> bool {
    guard.is_none()
}

fn reset_run_guard(mut commands: Commands) {
    commands.remove_resource::<RunOver>();
}

/// Ends the run on the first overlap between the player and any ground or
/// pipe box. Overlap testing is the engine's AABB intersection.
fn collision_system(
    mut commands: Commands,
    audio: Option<Res<GameAudio>>,
    score: Option<Res<Score>>,
    mut next_state: ResMut<NextState<GameState>>,
    players: Query<(&Transform, &Hitbox), With<Player>>,
    obstacles: Query<(&Transform, &Hitbox), (With<Obstacle>, Without<Player>)>,
) {
    let Ok((player_transform, player_box)) = players.single() else {
        return;
    };
    let player_aabb = Aabb2d::new(
        player_transform.translation.truncate(),
        player_box.0 / 2.0,
    );

    for (transform, hitbox) in &obstacles {
        let obstacle_aabb = Aabb2d::new(transform.translation.truncate(), hitbox.0 / 2.0);
        if player_aabb.intersects(&obstacle_aabb) {
            commands.insert_resource(RunOver);
            commands.remove_resource::<PipeSpawnTimer>();
            if let Some(audio) = &audio {
                audio.play(&mut commands, SoundEffect::Death);
            }
            match &score {
                Some(score) => info!("run over at score {}", score.0),
                None => info!("run over"),
            }
            next_state.set(GameState::GameOver);
            return;
        }
    }
}
