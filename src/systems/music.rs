//! Music request handling.
//!
//! [`music_request_system`] drives the [`MusicPlayer`] state machine from
//! [`MusicRequest`] messages and writes the resulting [`AudioCmd`]s.
//! [`track_music_failures`] feeds load failures from the audio thread back
//! into the player so it does not believe a broken track is playing.
//! [`save_volume_settings`] writes volume changes back to the settings file.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::music::MusicRequest;
use crate::resources::gameconfig::GameConfig;
use crate::resources::musiclibrary::{GameMode, MusicLibrary};
use crate::resources::musicplayer::{AudioCmds, AudioRng, MusicPlayer};
use bevy_ecs::prelude::*;
use log::{debug, warn};

/// Apply every pending [`MusicRequest`] to the [`MusicPlayer`].
pub fn music_request_system(
    mut requests: MessageReader<MusicRequest>,
    library: Res<MusicLibrary>,
    mut player: ResMut<MusicPlayer>,
    mut rng: ResMut<AudioRng>,
    mut cmds: MessageWriter<AudioCmd>,
) {
    for request in requests.read() {
        debug!("Music request: {:?}", request);
        let out = match *request {
            MusicRequest::PlayMode {
                mode,
                force_restart,
            } => play_mode(&library, &mut player, &mut rng, mode, force_restart),
            MusicRequest::PlayStartup => {
                play_mode(&library, &mut player, &mut rng, GameMode::Startup, false)
            }
            MusicRequest::NextTrack => match player.current_mode() {
                Some(mode) => play_mode(&library, &mut player, &mut rng, mode, true),
                None => continue,
            },
            MusicRequest::Stop => player.stop(),
            MusicRequest::Pause => player.pause(),
            MusicRequest::Resume => player.resume(),
            MusicRequest::SetMusicVolume(vol) => player.set_music_volume(vol),
            MusicRequest::SetSoundVolume(vol) => {
                player.set_sound_volume(vol);
                continue;
            }
        };
        cmds.write_batch(out);
    }
}

/// Copy volume requests into [`GameConfig`] and save it once per frame.
pub fn save_volume_settings(
    mut requests: MessageReader<MusicRequest>,
    config: Option<ResMut<GameConfig>>,
) {
    let Some(mut config) = config else {
        requests.clear();
        return;
    };
    let mut changed = false;
    for request in requests.read() {
        match *request {
            MusicRequest::SetMusicVolume(vol) => config.set_music_volume(vol),
            MusicRequest::SetSoundVolume(vol) => config.set_sound_volume(vol),
            _ => continue,
        }
        changed = true;
    }
    if !changed {
        return;
    }
    if let Err(e) = config.save_to_file() {
        warn!("Volume change not saved: {}", e);
    }
}

fn play_mode(
    library: &MusicLibrary,
    player: &mut MusicPlayer,
    rng: &mut AudioRng,
    mode: GameMode,
    force_restart: bool,
) -> AudioCmds {
    if !player.needs_start(mode, force_restart) {
        debug!("{} music already playing", mode);
        return Default::default();
    }
    let track = library.pick_for_mode(mode, &mut rng.0);
    player.start(mode, track.as_deref())
}

/// Mark the player idle when its current track fails to load.
pub fn track_music_failures(
    mut replies: MessageReader<AudioMessage>,
    mut player: ResMut<MusicPlayer>,
) {
    for reply in replies.read() {
        if let AudioMessage::MusicLoadFailed { id, error } = reply {
            warn!("Music '{}' failed to load: {}", id, error);
            player.load_failed(id);
        }
    }
}
