//! Sound effects for the arcade build. The classic build simply never
//! registers this plugin, and everything that plays a sound takes the
//! resource as an `Option`.

use bevy::audio::Volume;
use bevy::prelude::*;

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_audio);
    }
}

/// The three effects the game fires: a soft jump blip, a full-volume
/// score chime and death burst.
#[derive(Clone, Copy, Debug)]
pub enum SoundEffect {
    Jump,
    Score,
    Death,
}

#[derive(Resource)]
pub struct GameAudio {
    jump: Handle<AudioSource>,
    score: Handle<AudioSource>,
    death: Handle<AudioSource>,
}

impl GameAudio {
    /// Fire-and-forget playback; the audio entity removes itself when the
    /// clip ends.
    pub fn play(&self, commands: &mut Commands, effect: SoundEffect) {
        let (source, volume) = match effect {
            SoundEffect::Jump => (&self.jump, 0.5),
            SoundEffect::Score => (&self.score, 1.0),
            SoundEffect::Death => (&self.death, 1.0),
        };
        commands.spawn((
            AudioPlayer::new(source.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
        ));
    }
}

fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GameAudio {
        jump: asset_server.load("audio/jump.wav"),
        score: asset_server.load("audio/score.wav"),
        death: asset_server.load("audio/death.wav"),
    });
}
