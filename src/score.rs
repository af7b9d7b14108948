//! Run scoring for the arcade build: the exact-equality score gate and
//! the HUD counter.

use bevy::prelude::*;

use crate::audio::{GameAudio, SoundEffect};
use crate::collision::run_alive;
use crate::pipes::ScoreGate;
use crate::player::Player;
use crate::{GameState, SceneTag, SimSet};

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Score>()
            .add_systems(OnEnter(GameState::Playing), (reset_score, spawn_score_hud))
            .add_systems(
                FixedUpdate,
                score_gate_system
                    .in_set(SimSet::Control)
                    .run_if(in_state(GameState::Playing).and(run_alive)),
            )
            .add_systems(
                Update,
                update_score_hud.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Pipe pairs passed this run.
#[derive(Resource, Default)]
pub struct Score(pub u32);

#[derive(Component)]
struct ScoreText;

fn reset_score(mut score: ResMut<Score>) {
    score.0 = 0;
}

fn spawn_score_hud(mut commands: Commands) {
    commands.spawn((
        ScoreText,
        SceneTag::Game,
        Text::new("0"),
        TextFont::from_font_size(32.0),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(25.0),
            left: Val::Percent(50.0),
            ..default()
        },
    ));
}

/// Scores when a gate pipe's x lands exactly on the player's x. Runs
/// before the advance step, so each gate is examined at every x it ever
/// occupies; the spawn geometry guarantees one of those is the player's x
/// (see `PIPE_SPAWN_X`), and pipes never move right, so a gate can match
/// at most once.
fn score_gate_system(
    mut commands: Commands,
    mut score: ResMut<Score>,
    audio: Option<Res<GameAudio>>,
    players: Query<&Transform, With<Player>>,
    gates: Query<&Transform, (With<ScoreGate>, Without<Player>)>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    for gate in &gates {
        if gate.translation.x == player.translation.x {
            score.0 += 1;
            if let Some(audio) = &audio {
                audio.play(&mut commands, SoundEffect::Score);
            }
        }
    }
}

fn update_score_hud(score: Res<Score>, mut texts: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut texts {
        **text = score.0.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::physics::{advance_system, Velocity};
    use crate::pipes::Pipe;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Score>()
            .add_systems(Update, (score_gate_system, advance_system).chain());
        app
    }

    #[test]
    fn gate_scores_exactly_once_per_pipe() {
        let config = GameConfig::arcade();
        let mut app = test_app();

        app.world_mut().spawn((
            Player::default(),
            Transform::from_xyz(config.player_start.x, 80.0, 0.0),
        ));
        // A gate two steps short of the player's x.
        app.world_mut().spawn((
            Pipe,
            ScoreGate,
            Velocity(Vec2::new(-config.scroll_speed, 0.0)),
            Transform::from_xyz(
                config.player_start.x + 2.0 * config.scroll_speed,
                0.0,
                0.0,
            ),
        ));

        app.update();
        app.update();
        assert_eq!(app.world().resource::<Score>().0, 0);

        // Third tick: the gate sits exactly on the player's x.
        app.update();
        assert_eq!(app.world().resource::<Score>().0, 1);

        // And never scores again as it keeps moving left.
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.world().resource::<Score>().0, 1);
    }

    #[test]
    fn off_grid_gate_never_scores() {
        let config = GameConfig::arcade();
        let mut app = test_app();

        app.world_mut().spawn((
            Player::default(),
            Transform::from_xyz(config.player_start.x, 80.0, 0.0),
        ));
        // Offset by half a step: the gate straddles the player's x
        // without ever landing on it.
        app.world_mut().spawn((
            Pipe,
            ScoreGate,
            Velocity(Vec2::new(-config.scroll_speed, 0.0)),
            Transform::from_xyz(
                config.player_start.x + 2.5 * config.scroll_speed,
                0.0,
                0.0,
            ),
        ));

        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.world().resource::<Score>().0, 0);
    }
}
