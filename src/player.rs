//! The bird: spawn, wall-clock jump input, and the per-tick controller.

use bevy::prelude::*;

use crate::animation::FlyCycle;
use crate::assets::GameAssets;
use crate::audio::{GameAudio, SoundEffect};
use crate::collision::run_alive;
use crate::config::{GameConfig, GRAVITY, GROUND_LINE_Y, JUMP_SPEED, Z_PLAYER};
use crate::physics::{Acceleration, Hitbox, Velocity};
use crate::{GameState, SceneTag, SimSet};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_player)
            .add_systems(
                Update,
                jump_input_system.run_if(in_state(GameState::Playing).and(run_alive)),
            )
            .add_systems(
                FixedUpdate,
                player_control_system
                    .in_set(SimSet::Control)
                    .run_if(in_state(GameState::Playing).and(run_alive)),
            );
    }
}

/// The controllable bird. `jump_queued` is set by the wall-clock input
/// system and consumed by the next simulation tick.
#[derive(Component, Default)]
pub struct Player {
    pub jump_queued: bool,
}

/// Wall-clock gate between accepted jumps: counts down to zero, and only
/// at zero may the next jump pass.
#[derive(Component)]
pub struct JumpCooldown {
    remaining: f32,
    window: f32,
}

impl JumpCooldown {
    pub fn new(window: f32) -> Self {
        Self {
            remaining: 0.0,
            window,
        }
    }

    /// Advances the countdown. Returns true when a jump may be accepted.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= delta;
        }
        self.remaining <= 0.0
    }

    /// Closes the gate for the full window.
    pub fn arm(&mut self) {
        self.remaining = self.window;
    }
}

fn spawn_player(mut commands: Commands, config: Res<GameConfig>, assets: Res<GameAssets>) {
    spawn_bird(&mut commands, &config, &assets, SceneTag::Game);
}

/// Spawns the bird sprite tagged for `scene`. The menu uses the same
/// helper for its static preview; only the game-scene copy is simulated,
/// since every controller system is gated on `Playing`.
pub fn spawn_bird(
    commands: &mut Commands,
    config: &GameConfig,
    assets: &GameAssets,
    scene: SceneTag,
) {
    commands.spawn((
        Player::default(),
        JumpCooldown::new(config.jump_cooldown),
        Velocity::default(),
        Acceleration::default(),
        Hitbox(config.player_size()),
        FlyCycle::new(),
        Sprite {
            image: assets.fly_cycle.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: assets.fly_cycle_layout.clone(),
                index: 0,
            }),
            custom_size: Some(config.player_size()),
            ..default()
        },
        Transform::from_translation(config.player_start.extend(Z_PLAYER)),
        scene,
    ));
}

/// Reads the jump key on the wall clock. The key is level-triggered, so
/// the cooldown is what turns a held key into one impulse per window.
fn jump_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    audio: Option<Res<GameAudio>>,
    mut commands: Commands,
    mut players: Query<(&mut Player, &mut JumpCooldown)>,
) {
    for (mut player, mut cooldown) in &mut players {
        let ready = cooldown.tick(time.delta_secs());
        if ready && keys.pressed(KeyCode::Space) {
            cooldown.arm();
            player.jump_queued = true;
            if let Some(audio) = &audio {
                audio.play(&mut commands, SoundEffect::Jump);
            }
        }
    }
}

/// One controller tick: gravity, the classic ground safety net, a queued
/// jump impulse, then the arcade descent clamp. The jump may override the
/// safety net's zeroing; the clamp sees the final combined rate.
fn player_control_system(
    config: Res<GameConfig>,
    mut players: Query<(&Transform, &mut Player, &mut Velocity, &mut Acceleration)>,
) {
    for (transform, mut player, mut velocity, mut acceleration) in &mut players {
        acceleration.0.y = -GRAVITY;

        if config.clamp_at_ground {
            let bottom = transform.translation.y - config.player_size().y / 2.0;
            if bottom < GROUND_LINE_Y {
                acceleration.0.y = 0.0;
                velocity.0.y = 0.0;
            }
        }

        if player.jump_queued {
            player.jump_queued = false;
            acceleration.0.y = 0.0;
            velocity.0.y = JUMP_SPEED;
        }

        if let Some(max_rate) = config.max_descent_rate {
            if -(acceleration.0.y + velocity.0.y) > max_rate {
                acceleration.0.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::advance_system;
    use std::time::Duration;

    fn test_app(config: GameConfig) -> App {
        let mut app = App::new();
        app.insert_resource(config)
            .init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(
                Update,
                (jump_input_system, player_control_system, advance_system).chain(),
            );
        app
    }

    fn spawn_test_player(app: &mut App, config: &GameConfig, y: f32) -> Entity {
        app.world_mut()
            .spawn((
                Player::default(),
                JumpCooldown::new(config.jump_cooldown),
                Velocity::default(),
                Acceleration::default(),
                Transform::from_xyz(config.player_start.x, y, 0.0),
            ))
            .id()
    }

    fn step(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    fn press_space(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
    }

    fn release_space(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::Space);
    }

    #[test]
    fn cooldown_accepts_only_the_first_jump_in_a_window() {
        // Cooldown 100 ms; inputs at 0 ms, 50 ms and 160 ms. Only the
        // first and the third may produce an impulse.
        let config = GameConfig::classic();
        let mut app = test_app(config.clone());
        let player = spawn_test_player(&mut app, &config, 100.0);

        press_space(&mut app);
        step(&mut app, 0);
        assert_eq!(
            app.world().get::<Velocity>(player).unwrap().0.y,
            JUMP_SPEED
        );

        release_space(&mut app);
        step(&mut app, 50);

        // Second input, 50 ms after the first: ignored.
        press_space(&mut app);
        step(&mut app, 0);
        let velocity = app.world().get::<Velocity>(player).unwrap().0.y;
        assert!(
            velocity < JUMP_SPEED,
            "jump inside the cooldown window must be ignored, got {velocity}"
        );

        release_space(&mut app);
        step(&mut app, 110);

        // Third input, 160 ms after the first: accepted again.
        press_space(&mut app);
        step(&mut app, 0);
        assert_eq!(
            app.world().get::<Velocity>(player).unwrap().0.y,
            JUMP_SPEED
        );
    }

    #[test]
    fn held_key_jumps_once_per_window() {
        let config = GameConfig::classic();
        let mut app = test_app(config.clone());
        let player = spawn_test_player(&mut app, &config, 100.0);

        press_space(&mut app);
        let mut impulses = 0;
        for _ in 0..12 {
            step(&mut app, 20);
            if app.world().get::<Velocity>(player).unwrap().0.y == JUMP_SPEED {
                impulses += 1;
            }
        }
        // 240 ms of holding with a 100 ms window: an impulse roughly every
        // fifth 20 ms step, never back-to-back.
        assert!(impulses >= 2 && impulses <= 3, "got {impulses} impulses");
    }

    #[test]
    fn gravity_pulls_the_bird_down() {
        let config = GameConfig::arcade();
        let mut app = test_app(config.clone());
        let player = spawn_test_player(&mut app, &config, 100.0);

        step(&mut app, 16);
        step(&mut app, 16);

        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(velocity.0.y, -2.0 * GRAVITY);
    }

    #[test]
    fn classic_build_zeroes_motion_below_the_ground_line() {
        let config = GameConfig::classic();
        let mut app = test_app(config.clone());
        let player = spawn_test_player(&mut app, &config, GROUND_LINE_Y - 20.0);
        app.world_mut()
            .get_mut::<Velocity>(player)
            .unwrap()
            .0
            .y = -4.0;

        step(&mut app, 16);

        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(velocity.0.y, 0.0);
        let acceleration = app.world().get::<Acceleration>(player).unwrap();
        assert_eq!(acceleration.0.y, 0.0);
    }

    #[test]
    fn arcade_build_caps_the_descent_rate() {
        let config = GameConfig::arcade();
        let mut app = test_app(config.clone());
        let player = spawn_test_player(&mut app, &config, 100.0);
        app.world_mut()
            .get_mut::<Velocity>(player)
            .unwrap()
            .0
            .y = -6.0;

        step(&mut app, 16);

        // Gravity would have pushed the combined rate past 6; the clamp
        // zeroes the acceleration instead.
        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(velocity.0.y, -6.0);
    }

    #[test]
    fn classic_build_has_no_descent_cap() {
        let config = GameConfig::classic();
        let mut app = test_app(config.clone());
        let player = spawn_test_player(&mut app, &config, 200.0);
        app.world_mut()
            .get_mut::<Velocity>(player)
            .unwrap()
            .0
            .y = -6.0;

        step(&mut app, 16);

        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(velocity.0.y, -6.0 - GRAVITY);
    }
}
