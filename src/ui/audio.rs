//! Audio — one looping music track plus one-shot feedback sounds.

use bevy::audio::{PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct BackgroundMusic;

pub fn start_background_music(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("[Audio] Starting background music");
    commands.spawn((
        BackgroundMusic,
        AudioPlayer::new(asset_server.load("audio/music/farm_theme.ogg")),
        PlaybackSettings::LOOP.with_volume(Volume::new(0.4)),
    ));
}

/// Coin jingle on every harvest. DESPAWN settings clean the entity up
/// when the clip finishes.
pub fn play_harvest_sfx(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut events: EventReader<CropHarvestedEvent>,
) {
    for _ in events.read() {
        commands.spawn((
            AudioPlayer::new(asset_server.load("audio/sfx/coin_pickup.ogg")),
            PlaybackSettings::DESPAWN,
        ));
    }
}

/// Fanfare on a win, error buzz on a loss.
pub fn play_game_end_sfx(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut events: EventReader<GameEndedEvent>,
) {
    for ev in events.read() {
        let path = if ev.won {
            "audio/sfx/fanfare.ogg"
        } else {
            "audio/sfx/game_over.ogg"
        };
        commands.spawn((
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings::DESPAWN,
        ));
    }
}
