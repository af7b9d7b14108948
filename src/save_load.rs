//! Best-score persistence for the arcade build: a small RON file in the
//! per-user data directory. Missing or corrupt files degrade to defaults;
//! nothing here can abort the game.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_best_score);
    }
}

/// Highest score across runs.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BestScore(pub u32);

fn save_file_path() -> Option<PathBuf> {
    Some(dirs::data_local_dir()?.join("flappy").join("best_score.ron"))
}

/// Startup system: makes the stored best score available as a resource,
/// falling back to zero when there is nothing usable on disk.
fn load_best_score(mut commands: Commands) {
    let best = save_file_path()
        .and_then(|path| read_best_score(&path))
        .unwrap_or_default();
    commands.insert_resource(best);
}

fn read_best_score(path: &Path) -> Option<BestScore> {
    if !path.exists() {
        info!("no best-score file at {:?}, starting fresh", path);
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<BestScore>(&contents) {
            Ok(best) => {
                info!("loaded best score {} from {:?}", best.0, path);
                Some(best)
            }
            Err(e) => {
                error!("failed to parse best-score file: {e}; using defaults");
                None
            }
        },
        Err(e) => {
            error!("failed to read best-score file: {e}; using defaults");
            None
        }
    }
}

/// Writes the best score out. Called when a run ends with a new best, not
/// every frame.
pub fn save_best_score(best: &BestScore) {
    let Some(path) = save_file_path() else {
        error!("could not resolve a data directory for the best-score file");
        return;
    };
    write_best_score(&path, best);
}

fn write_best_score(path: &Path, best: &BestScore) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            error!("failed to create save directory: {e}");
            return;
        }
    }
    match ron::ser::to_string_pretty(best, ron::ser::PrettyConfig::default()) {
        Ok(serialized) => {
            if let Err(e) = std::fs::write(path, serialized) {
                error!("failed to write best-score file: {e}");
            } else {
                info!("best score {} saved to {:?}", best.0, path);
            }
        }
        Err(e) => error!("failed to serialize best score: {e}"),
    }
}
