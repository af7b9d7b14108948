//! The bird's looping flap animation, driven off the frame clock and only
//! while the game scene is live; the menu preview holds its pose.

use bevy::prelude::*;

use crate::config::{FLY_CYCLE_FPS, FLY_CYCLE_FRAMES};
use crate::GameState;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            animate_fly_cycle.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Frame clock for the fly-cycle sheet.
#[derive(Component)]
pub struct FlyCycle {
    frame_timer: f32,
    frame_duration: f32,
    frame_index: usize,
}

impl FlyCycle {
    pub fn new() -> Self {
        Self {
            frame_timer: 0.0,
            frame_duration: 1.0 / FLY_CYCLE_FPS,
            frame_index: 0,
        }
    }

    /// Advances the clock and returns the frame to display.
    pub fn advance(&mut self, delta: f32) -> usize {
        self.frame_timer += delta;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.frame_index = (self.frame_index + 1) % FLY_CYCLE_FRAMES;
        }
        self.frame_index
    }
}

impl Default for FlyCycle {
    fn default() -> Self {
        Self::new()
    }
}

fn animate_fly_cycle(time: Res<Time>, mut query: Query<(&mut FlyCycle, &mut Sprite)>) {
    for (mut cycle, mut sprite) in &mut query {
        let frame = cycle.advance(time.delta_secs());
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = frame;
        }
    }
}
