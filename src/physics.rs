//! The per-tick kinematics shared by everything that moves: the player,
//! the pipes, and the ground strip.

use bevy::prelude::*;

use crate::collision::run_alive;
use crate::{GameState, SimSet};

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (SimSet::Control, SimSet::Advance, SimSet::Settle).chain(),
        )
        .add_systems(
            FixedUpdate,
            (advance_system, expire_ttl_system)
                .chain()
                .in_set(SimSet::Advance)
                .run_if(in_state(GameState::Playing).and(run_alive)),
        );
    }
}

/// Velocity in px per simulation tick.
#[derive(Component, Default, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Acceleration in px per tick².
#[derive(Component, Default, Clone, Copy)]
pub struct Acceleration(pub Vec2);

/// Remaining simulation ticks before the entity is despawned.
#[derive(Component)]
pub struct Ttl(pub u32);

/// Axis-aligned collision extent (full size, world units).
#[derive(Component, Clone, Copy)]
pub struct Hitbox(pub Vec2);

/// The advance step: position moves by the current velocity, then the
/// velocity picks up the acceleration. An impulse set by this tick's
/// controller therefore moves the entity this same tick.
pub fn advance_system(
    mut movers: Query<(&mut Transform, &mut Velocity, Option<&Acceleration>)>,
) {
    for (mut transform, mut velocity, acceleration) in &mut movers {
        transform.translation += velocity.0.extend(0.0);
        if let Some(acceleration) = acceleration {
            velocity.0 += acceleration.0;
        }
    }
}

/// Counts `Ttl` down once per tick and despawns entities that run out.
/// Expired pipes are the only entities reclaimed this way.
pub fn expire_ttl_system(mut commands: Commands, mut expiring: Query<(Entity, &mut Ttl)>) {
    for (entity, mut ttl) in &mut expiring {
        ttl.0 = ttl.0.saturating_sub(1);
        if ttl.0 == 0 {
            commands.entity(entity).despawn();
        }
    }
}
