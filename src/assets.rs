//! Image loading. The whole manifest must be in memory before the game
//! starts; a single failure logs the error and shuts the app down.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::config::{GameConfig, FLY_CYCLE_FRAMES, PLAYER_FRAME};
use crate::GameState;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, queue_asset_load)
            .add_systems(Update, wait_for_assets.run_if(in_state(GameState::Loading)));
    }
}

/// Handles for the image manifest, plus the atlas layout for the
/// fly-cycle sheet.
#[derive(Resource)]
pub struct GameAssets {
    pub fly_cycle: Handle<Image>,
    pub fly_cycle_layout: Handle<TextureAtlasLayout>,
    pub background: Handle<Image>,
    pub ground: Handle<Image>,
    pub pipe_up: Handle<Image>,
    pub pipe_down: Handle<Image>,
    /// Present only in builds with a menu scene.
    pub button: Option<Handle<Image>>,
}

impl GameAssets {
    /// The images whose load state gates startup, with their file names
    /// for error reporting.
    fn manifest(&self) -> Vec<(&'static str, &Handle<Image>)> {
        let mut entries = vec![
            ("fly_cycle.png", &self.fly_cycle),
            ("background.jpg", &self.background),
            ("ground.jpg", &self.ground),
            ("pipe_up.png", &self.pipe_up),
            ("pipe_down.png", &self.pipe_down),
        ];
        if let Some(button) = &self.button {
            entries.push(("button.png", button));
        }
        entries
    }
}

fn queue_asset_load(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let fly_cycle_layout = layouts.add(TextureAtlasLayout::from_grid(
        PLAYER_FRAME.as_uvec2(),
        FLY_CYCLE_FRAMES as u32,
        1,
        None,
        None,
    ));

    commands.insert_resource(GameAssets {
        fly_cycle: asset_server.load("fly_cycle.png"),
        fly_cycle_layout,
        background: asset_server.load("background.jpg"),
        ground: asset_server.load("ground.jpg"),
        pipe_up: asset_server.load("pipe_up.png"),
        pipe_down: asset_server.load("pipe_down.png"),
        button: config.with_menu.then(|| asset_server.load("button.png")),
    });
}

/// Holds the app in `Loading` until every manifest image has loaded, then
/// moves on to the build's first gameplay state. There is no retry and no
/// partial start.
fn wait_for_assets(
    asset_server: Res<AssetServer>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let mut all_loaded = true;
    for (name, handle) in assets.manifest() {
        match asset_server.load_state(handle.id()) {
            LoadState::Loaded => {}
            LoadState::Failed(err) => {
                error!("failed to load {name}: {err}");
                exit.write(AppExit::error());
                return;
            }
            _ => all_loaded = false,
        }
    }
    if all_loaded {
        info!("all images loaded");
        next_state.set(config.first_state());
    }
}
