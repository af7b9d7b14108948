//! Shared constants and per-iteration tuning.
//!
//! Physics constants are expressed per simulation tick (the fixed 60 Hz
//! step), matching the engine's advance semantics rather than wall-clock
//! seconds.

use std::ops::Range;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::GameState;

/// Playfield dimensions in pixels. World coordinates are centered, so the
/// visible area spans half of each in every direction.
pub const WINDOW_WIDTH: f32 = 640.0;
pub const WINDOW_HEIGHT: f32 = 480.0;

/// Simulation tick rate for the fixed timestep.
pub const TICK_RATE: f64 = 60.0;

/// Downward acceleration applied to the player every tick (px/tick²).
pub const GRAVITY: f32 = 0.25;
/// Upward velocity set by an accepted jump (px/tick).
pub const JUMP_SPEED: f32 = 5.0;
/// Ceiling on combined downward acceleration + velocity (px/tick). Only
/// the arcade build enforces it.
pub const MAX_DESCENT_RATE: f32 = 6.0;

/// Height of the scrolling ground strip.
pub const GROUND_HEIGHT: f32 = 96.0;
/// World y of the visible ground line (top edge of the strip).
pub const GROUND_LINE_Y: f32 = -WINDOW_HEIGHT / 2.0 + GROUND_HEIGHT;
/// World y of a ground tile's center.
pub const GROUND_Y: f32 = -WINDOW_HEIGHT / 2.0 + GROUND_HEIGHT / 2.0;

/// Fraction of the screen height separating a pipe pair.
pub const GAP_FRACTION: f32 = 0.2;
/// Vertical opening between a pipe pair.
pub const GAP_HEIGHT: f32 = GAP_FRACTION * WINDOW_HEIGHT;
/// Smallest distance between the top of the screen and the top of the gap.
pub const PIPE_OFFSET_MIN: f32 = 20.0;

/// Rendered pipe size. Tall enough to reach past the playfield edge from
/// either side of the gap at any in-band offset.
pub const PIPE_SIZE: Vec2 = Vec2::new(56.0, 480.0);

/// World x where the player hovers in the arcade build.
pub const PLAYER_X: f32 = -WINDOW_WIDTH / 4.0;
/// World x where new pipes appear, just past the right edge.
///
/// `PIPE_SPAWN_X - PLAYER_X` must stay a whole multiple of the arcade
/// scroll speed: the score gate compares x coordinates for exact equality,
/// so the crossing tick has to land on the player's x rather than step
/// over it.
pub const PIPE_SPAWN_X: f32 = WINDOW_WIDTH / 2.0 + PIPE_SIZE.x / 2.0;

/// Source frame size of the fly-cycle sprite sheet.
pub const PLAYER_FRAME: Vec2 = Vec2::new(17.0, 12.0);
pub const FLY_CYCLE_FRAMES: usize = 3;
pub const FLY_CYCLE_FPS: f32 = 15.0;

/// Draw order. Pipes slide behind the ground strip; the player flies
/// behind the pipes.
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_PLAYER: f32 = 5.0;
pub const Z_PIPE: f32 = 6.0;
pub const Z_GROUND: f32 = 10.0;

/// Per-iteration tuning. The two constructors are the two shipped games.
#[derive(Resource, Clone)]
pub struct GameConfig {
    /// Seconds a jump input is ignored after an accepted jump.
    pub jump_cooldown: f32,
    /// Wall-clock period of the pipe spawner.
    pub spawn_interval: Duration,
    /// Leftward scroll speed of pipes and ground (px/tick).
    pub scroll_speed: f32,
    /// Zero velocity and acceleration when the player's bottom edge would
    /// pass the ground line (the first iteration's safety net).
    pub clamp_at_ground: bool,
    /// Descent-rate cap, when the build enforces one.
    pub max_descent_rate: Option<f32>,
    /// Pipe lifetime in ticks, when pipes expire at all.
    pub pipe_ttl: Option<u32>,
    /// Player sprite scale.
    pub player_scale: f32,
    /// Player spawn position (world coordinates).
    pub player_start: Vec2,
    /// Whether the game opens on the menu scene.
    pub with_menu: bool,
}

impl GameConfig {
    /// The first iteration: faster pipes, shorter cooldown, no menu.
    pub fn classic() -> Self {
        Self {
            jump_cooldown: 0.1,
            spawn_interval: Duration::from_millis(2000),
            scroll_speed: 5.0,
            clamp_at_ground: true,
            max_descent_rate: None,
            pipe_ttl: None,
            player_scale: 1.8,
            player_start: Vec2::ZERO,
            with_menu: false,
        }
    }

    /// The refreshed iteration: menu scene, scoring, sound, pipe expiry.
    pub fn arcade() -> Self {
        Self {
            jump_cooldown: 0.2,
            spawn_interval: Duration::from_millis(1500),
            scroll_speed: 2.0,
            clamp_at_ground: false,
            max_descent_rate: Some(MAX_DESCENT_RATE),
            pipe_ttl: Some(WINDOW_WIDTH as u32),
            player_scale: 1.5,
            player_start: Vec2::new(PLAYER_X, 80.0),
            with_menu: true,
        }
    }

    /// Scaled player size; doubles as the collision box.
    pub fn player_size(&self) -> Vec2 {
        PLAYER_FRAME * self.player_scale
    }

    /// Valid gap-top offsets, measured downward from the top of the
    /// screen. The upper bound keeps the whole gap above the ground strip.
    pub fn gap_offset_band(&self) -> Range<f32> {
        PIPE_OFFSET_MIN..(WINDOW_HEIGHT - GROUND_HEIGHT - GAP_HEIGHT)
    }

    /// State the game enters once every image is loaded.
    pub fn first_state(&self) -> GameState {
        if self.with_menu {
            GameState::Menu
        } else {
            GameState::Playing
        }
    }
}

/// Samples a gap-top offset for a new pipe pair.
pub fn sample_gap_offset(rng: &mut impl Rng, config: &GameConfig) -> f32 {
    rng.gen_range(config.gap_offset_band())
}

/// World-space center y for the top and bottom pipe of a pair whose gap's
/// top edge sits `offset` pixels below the top of the screen.
pub fn pipe_pair_centers(offset: f32) -> (f32, f32) {
    let gap_top = WINDOW_HEIGHT / 2.0 - offset;
    let gap_bottom = gap_top - GAP_HEIGHT;
    (gap_top + PIPE_SIZE.y / 2.0, gap_bottom - PIPE_SIZE.y / 2.0)
}
