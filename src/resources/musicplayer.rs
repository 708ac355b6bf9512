//! Music playback state.
//!
//! [`MusicPlayer`] remembers which mode and track are active and whether
//! playback is running or paused. Each transition returns the
//! [`AudioCmd`]s that bring the audio thread in line with the new state; the
//! caller decides where to send them.
//!
//! ```text
//!            start(track)            pause()
//!   Idle ──────────────────▶ Playing ───────▶ Paused
//!    ▲                        │  ▲              │
//!    │ stop() / start(None)   │  └── resume() ──┘
//!    └────────────────────────┘
//! ```

use crate::events::audio::AudioCmd;
use crate::resources::gameconfig::clamp_volume;
use crate::resources::musiclibrary::GameMode;
use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::{debug, info};
use smallvec::SmallVec;
use std::path::Path;

pub type AudioCmds = SmallVec<[AudioCmd; 5]>;

/// Random source for track and sound picks.
#[derive(Resource, Debug, Clone)]
pub struct AudioRng(pub Rng);

impl Default for AudioRng {
    fn default() -> Self {
        Self(Rng::new())
    }
}

impl AudioRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(Rng::with_seed(seed))
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MusicPlayer {
    current_mode: Option<GameMode>,
    current_track: Option<String>,
    is_playing: bool,
    is_paused: bool,
    music_volume: f32,
    sound_volume: f32,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new(0.5, 1.0)
    }
}

impl MusicPlayer {
    pub fn new(music_volume: f32, sound_volume: f32) -> Self {
        Self {
            current_mode: None,
            current_track: None,
            is_playing: false,
            is_paused: false,
            music_volume: clamp_volume(music_volume),
            sound_volume: clamp_volume(sound_volume),
        }
    }

    pub fn current_mode(&self) -> Option<GameMode> {
        self.current_mode
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sound_volume(&self) -> f32 {
        self.sound_volume
    }

    /// Whether a play request for `mode` has to do anything.
    pub fn needs_start(&self, mode: GameMode, force_restart: bool) -> bool {
        force_restart || !(self.current_mode == Some(mode) && self.is_playing)
    }

    /// Switch to `mode`, playing `track` looped, or go silent if `None`.
    pub fn start(&mut self, mode: GameMode, track: Option<&Path>) -> AudioCmds {
        let mut cmds = self.release_current();
        self.current_mode = Some(mode);

        let Some(track) = track else {
            info!("No tracks available for {} mode", mode);
            self.is_playing = false;
            self.is_paused = false;
            return cmds;
        };

        let id = track.to_string_lossy().into_owned();
        info!("Selected track for {} mode: {}", mode, id);
        cmds.push(AudioCmd::LoadMusic {
            id: id.clone(),
            path: id.clone(),
        });
        cmds.push(AudioCmd::VolumeMusic {
            id: id.clone(),
            vol: self.music_volume,
        });
        cmds.push(AudioCmd::PlayMusic {
            id: id.clone(),
            looped: true,
        });
        self.current_track = Some(id);
        self.is_playing = true;
        self.is_paused = false;
        cmds
    }

    fn release_current(&mut self) -> AudioCmds {
        let mut cmds = AudioCmds::new();
        if let Some(id) = self.current_track.take() {
            cmds.push(AudioCmd::StopMusic { id: id.clone() });
            cmds.push(AudioCmd::UnloadMusic { id });
        }
        cmds
    }

    pub fn stop(&mut self) -> AudioCmds {
        let mut cmds = AudioCmds::new();
        if let Some(id) = &self.current_track {
            if self.is_playing {
                cmds.push(AudioCmd::StopMusic { id: id.clone() });
            }
        }
        self.is_playing = false;
        self.is_paused = false;
        cmds
    }

    pub fn pause(&mut self) -> AudioCmds {
        let mut cmds = AudioCmds::new();
        if self.is_playing && !self.is_paused {
            if let Some(id) = &self.current_track {
                cmds.push(AudioCmd::PauseMusic { id: id.clone() });
            }
            self.is_paused = true;
        }
        cmds
    }

    pub fn resume(&mut self) -> AudioCmds {
        let mut cmds = AudioCmds::new();
        if self.is_playing && self.is_paused {
            if let Some(id) = &self.current_track {
                cmds.push(AudioCmd::ResumeMusic { id: id.clone() });
            }
            self.is_paused = false;
        }
        cmds
    }

    /// Clamp and apply a new music volume to the current and later tracks.
    pub fn set_music_volume(&mut self, volume: f32) -> AudioCmds {
        self.music_volume = clamp_volume(volume);
        let mut cmds = AudioCmds::new();
        if let Some(id) = &self.current_track {
            cmds.push(AudioCmd::VolumeMusic {
                id: id.clone(),
                vol: self.music_volume,
            });
        }
        cmds
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = clamp_volume(volume);
    }

    /// The audio thread could not load `id`.
    pub fn load_failed(&mut self, id: &str) {
        if self.current_track.as_deref() == Some(id) {
            debug!("Current track {} failed to load, marking idle", id);
            self.is_playing = false;
            self.is_paused = false;
        }
    }
}
