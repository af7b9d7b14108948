use bevy::prelude::*;

pub mod animation;
pub mod assets;
pub mod audio;
pub mod collision;
pub mod config;
pub mod menu;
pub mod physics;
pub mod pipes;
pub mod player;
pub mod save_load;
pub mod score;
pub mod world;

/// Top-level flow of the app.
///
/// `Loading` blocks until the image manifest is in memory. Where the game
/// goes from there depends on the build: the arcade build opens on `Menu`,
/// the classic build drops straight into `Playing`. `GameOver` is terminal
/// for the classic build (the last frame stays on screen) and an immediate
/// bounce back to `Menu` for the arcade build.
#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum GameState {
    #[default]
    Loading,
    Menu,
    Playing,
    GameOver,
}

/// Which scene an entity belongs to. A scene's entities are torn down
/// wholesale when its state exits, so nothing leaks across restarts.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SceneTag {
    Menu,
    Game,
}

/// Ordering of one simulation tick: controller decisions first, then the
/// advance step, then collision and expiry on the settled positions.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Control,
    Advance,
    Settle,
}

/// Despawns every entity tagged with `scene`, children included.
pub fn despawn_scene(
    commands: &mut Commands,
    entities: &Query<(Entity, &SceneTag)>,
    scene: SceneTag,
) {
    for (entity, tag) in entities.iter() {
        if *tag == scene {
            commands.entity(entity).despawn();
        }
    }
}
