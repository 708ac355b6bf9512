//! Audio playback backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's replies
//!   into the ECS message queue each frame.
//! - [`forward_audio_cmds`] ships commands written by the music and sound
//!   systems across the channel.
//!
//! Raylib audio calls stay on one thread; the game thread only talks to it
//! through channels. Music streams need periodic `update_stream()` calls, the
//! loop here takes care of that while tracks are playing.
//!
//! When no audio device can be opened the thread still answers: loads come
//! back as `*LoadFailed`, everything else is ignored, and the game keeps
//! running silently.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(10);

/// Drain pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run this after [`poll_audio_messages`] in your schedule.
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // the thread may already be gone during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks until [`AudioCmd::Shutdown`] arrives or the command channel closes.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    info!("Audio thread starting (id={:?})", std::thread::current().id());
    match RaylibAudio::init_audio_device() {
        Ok(device) => run_device(&device, &rx_cmd, &tx_msg),
        Err(e) => {
            error!("Failed to initialize audio device: {}; continuing silently", e);
            run_silent(&rx_cmd, &tx_msg);
        }
    }
    info!("Audio thread exiting");
}

/// Command loop without a device. Every load fails, everything else is dropped.
fn run_silent(rx_cmd: &Receiver<AudioCmd>, tx_msg: &Sender<AudioMessage>) {
    const NO_DEVICE: &str = "audio device unavailable";
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadMusic { id, .. } => {
                let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                    id,
                    error: NO_DEVICE.to_string(),
                });
            }
            AudioCmd::LoadFx { id, .. } => {
                let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                    id,
                    error: NO_DEVICE.to_string(),
                });
            }
            AudioCmd::Shutdown => {
                debug!("Shutdown requested (silent mode)");
                break;
            }
            other => debug!("Ignoring {:?} without audio device", other),
        }
    }
}

/// Owned Raylib handles plus playback bookkeeping.
struct Mixer<'aud> {
    musics: FxHashMap<String, Music<'aud>>,
    playing: FxHashSet<String>,
    looped: FxHashSet<String>,
    sounds: FxHashMap<String, Sound<'aud>>,
    fx_playing: FxHashSet<String>,
}

impl<'aud> Mixer<'aud> {
    fn new() -> Self {
        Self {
            musics: FxHashMap::default(),
            playing: FxHashSet::default(),
            looped: FxHashSet::default(),
            sounds: FxHashMap::default(),
            fx_playing: FxHashSet::default(),
        }
    }

    fn clear(&mut self) {
        self.playing.clear();
        self.looped.clear();
        self.fx_playing.clear();
        self.musics.clear();
        self.sounds.clear();
    }
}

fn run_device(audio: &RaylibAudio, rx_cmd: &Receiver<AudioCmd>, tx_msg: &Sender<AudioMessage>) {
    let mut mixer = Mixer::new();

    'run: loop {
        // 1) Drain commands
        loop {
            let cmd = match rx_cmd.try_recv() {
                Ok(cmd) => cmd,
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    warn!("Command channel closed without shutdown");
                    break 'run;
                }
            };
            if !handle_cmd(audio, &mut mixer, cmd, tx_msg) {
                break 'run;
            }
        }

        // 2) Pump streams, restart loops, report natural ends
        pump_music(&mixer, tx_msg).into_iter().for_each(|id| {
            mixer.playing.remove(&id);
        });
        pump_fx(&mut mixer, tx_msg);

        std::thread::sleep(TICK);
    }

    mixer.clear();
}

/// Apply one command. Returns `false` once shutdown was requested.
fn handle_cmd<'aud>(
    audio: &'aud RaylibAudio,
    mixer: &mut Mixer<'aud>,
    cmd: AudioCmd,
    tx_msg: &Sender<AudioMessage>,
) -> bool {
    match cmd {
        AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
            Ok(music) => {
                debug!("Loaded music id='{}' path='{}'", id, path);
                mixer.musics.insert(id.clone(), music);
                let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
            }
            Err(e) => {
                warn!("Music load failed id='{}' path='{}': {}", id, path, e);
                let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                    id,
                    error: e.to_string(),
                });
            }
        },
        AudioCmd::UnloadMusic { id } => {
            mixer.playing.remove(&id);
            mixer.looped.remove(&id);
            if mixer.musics.remove(&id).is_some() {
                debug!("Unloaded music id='{}'", id);
                let _ = tx_msg.send(AudioMessage::MusicUnloaded { id });
            }
        }
        AudioCmd::PlayMusic { id, looped } => {
            if let Some(music) = mixer.musics.get(&id) {
                debug!("Play music id='{}' looped={}", id, looped);
                music.seek_stream(0.0);
                music.play_stream();
                mixer.playing.insert(id.clone());
                if looped {
                    mixer.looped.insert(id.clone());
                } else {
                    mixer.looped.remove(&id);
                }
                let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
            }
        }
        AudioCmd::StopMusic { id } => {
            if let Some(music) = mixer.musics.get(&id) {
                music.stop_stream();
                mixer.playing.remove(&id);
                mixer.looped.remove(&id);
                let _ = tx_msg.send(AudioMessage::MusicStopped { id });
            }
        }
        AudioCmd::PauseMusic { id } => {
            if let Some(music) = mixer.musics.get(&id) {
                music.pause_stream();
                mixer.playing.remove(&id);
                let _ = tx_msg.send(AudioMessage::MusicPaused { id });
            }
        }
        AudioCmd::ResumeMusic { id } => {
            if let Some(music) = mixer.musics.get(&id) {
                music.resume_stream();
                mixer.playing.insert(id.clone());
                let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
            }
        }
        AudioCmd::VolumeMusic { id, vol } => {
            if let Some(music) = mixer.musics.get(&id) {
                music.set_volume(vol);
                let _ = tx_msg.send(AudioMessage::MusicVolumeChanged { id, vol });
            }
        }
        AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
            Ok(sound) => {
                debug!("Loaded fx id='{}' path='{}'", id, path);
                mixer.sounds.insert(id.clone(), sound);
                let _ = tx_msg.send(AudioMessage::FxLoaded { id });
            }
            Err(e) => {
                warn!("Fx load failed id='{}' path='{}': {}", id, path, e);
                let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                    id,
                    error: e.to_string(),
                });
            }
        },
        AudioCmd::PlayFx { id, vol } => match mixer.sounds.get(&id) {
            Some(sound) => {
                sound.set_volume(vol);
                sound.play();
                mixer.fx_playing.insert(id);
            }
            None => debug!("Fx '{}' not loaded, skipping", id),
        },
        AudioCmd::Shutdown => {
            debug!("Shutdown requested");
            return false;
        }
    }
    true
}

/// Keep playing streams fed. Returns ids of non-looped tracks that ended.
fn pump_music(mixer: &Mixer<'_>, tx_msg: &Sender<AudioMessage>) -> Vec<String> {
    let mut finished = Vec::new();
    for id in mixer.playing.iter() {
        let Some(music) = mixer.musics.get(id) else {
            continue;
        };
        if music.is_stream_playing() {
            music.update_stream();
            continue;
        }
        if music.get_time_played() < music.get_time_length() - 0.01 {
            continue;
        }
        if mixer.looped.contains(id) {
            music.seek_stream(0.0);
            music.play_stream();
            let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id: id.clone() });
        } else {
            let _ = tx_msg.send(AudioMessage::MusicFinished { id: id.clone() });
            finished.push(id.clone());
        }
    }
    finished
}

fn pump_fx(mixer: &mut Mixer<'_>, tx_msg: &Sender<AudioMessage>) {
    let sounds = &mixer.sounds;
    mixer.fx_playing.retain(|id| {
        let still_playing = sounds.get(id).is_some_and(|s| s.is_playing());
        if !still_playing {
            let _ = tx_msg.send(AudioMessage::FxFinished { id: id.clone() });
        }
        still_playing
    });
}
