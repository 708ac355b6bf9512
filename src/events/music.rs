//! Music control requests.
//!
//! Screens write a [`MusicRequest`] when they are entered or when the
//! settings menu changes a volume. The
//! [`music_request_system`](crate::systems::music::music_request_system)
//! turns them into [`AudioCmd`](crate::events::audio::AudioCmd)s.

use crate::resources::musiclibrary::GameMode;
use bevy_ecs::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum MusicRequest {
    /// Play music for a mode. Ignored when that mode is already playing,
    /// unless `force_restart` is set.
    PlayMode { mode: GameMode, force_restart: bool },
    /// Startup jingle: `startup_theme.mp3` when present.
    PlayStartup,
    /// Pick another track for the current mode.
    NextTrack,
    Stop,
    Pause,
    Resume,
    SetMusicVolume(f32),
    SetSoundVolume(f32),
}

impl MusicRequest {
    pub fn play(mode: GameMode) -> Self {
        MusicRequest::PlayMode {
            mode,
            force_restart: false,
        }
    }
}
