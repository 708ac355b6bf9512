//! World and schedule construction.
//!
//! [`build_world`] scans the asset folders once and inserts every resource
//! and message queue the systems need. [`build_schedule`] orders the
//! per-frame systems: input translation and gameplay reactions first, then
//! the audio bridge, which only runs once [`setup_audio`] has spawned the
//! audio thread.
//!
//! [`setup_audio`]: crate::resources::audio::setup_audio

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;
use log::info;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::gameplay::{GameplayEvent, SoundRequest};
use crate::events::input::{GameActionEvent, GestureEvent};
use crate::events::music::MusicRequest;
use crate::resources::assetlayout::AssetLayout;
use crate::resources::audio::AudioBridge;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gestures::GestureBindings;
use crate::resources::imagecatalog::ImageCatalog;
use crate::resources::musiclibrary::MusicLibrary;
use crate::resources::musicplayer::{AudioRng, MusicPlayer};
use crate::resources::soundbank::SoundBank;
use crate::resources::store::Store;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::gestures::translate_gestures;
use crate::systems::music::{music_request_system, save_volume_settings, track_music_failures};
use crate::systems::soundfx::play_gameplay_sounds;
use crate::systems::store::award_line_chips;

/// Build a world from loaded settings.
///
/// An unusable sound pack in the settings falls back to the default pack.
pub fn build_world(config: GameConfig) -> World {
    let layout = AssetLayout::from_config(&config);

    let mut world = World::new();
    world.insert_resource(MusicLibrary::load(&layout));
    world.insert_resource(SoundBank::load_with_pack(&layout, &config.sound_pack));
    world.insert_resource(ImageCatalog::new(&layout));
    world.insert_resource(Store::open(&config.store_file));
    world.insert_resource(MusicPlayer::new(config.music_volume, config.sound_volume));
    world.insert_resource(AudioRng::default());
    world.insert_resource(GestureBindings::default());
    world.insert_resource(layout);
    world.insert_resource(config);

    world.init_resource::<Messages<MusicRequest>>();
    world.init_resource::<Messages<GameplayEvent>>();
    world.init_resource::<Messages<SoundRequest>>();
    world.init_resource::<Messages<GestureEvent>>();
    world.init_resource::<Messages<GameActionEvent>>();
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    info!("World ready");
    world
}

/// Swap the double buffer of a message queue.
pub fn update_messages<M: Message>(mut msgs: ResMut<Messages<M>>) {
    msgs.update();
}

pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_messages::<MusicRequest>,
            update_messages::<GameplayEvent>,
            update_messages::<SoundRequest>,
            update_messages::<GestureEvent>,
            update_messages::<GameActionEvent>,
        )
            .before(translate_gestures)
            .before(music_request_system)
            .before(play_gameplay_sounds)
            .before(award_line_chips),
    );
    update.add_systems(translate_gestures);
    update.add_systems((track_music_failures, music_request_system).chain());
    update.add_systems(save_volume_settings.after(update_messages::<MusicRequest>));
    update.add_systems(play_gameplay_sounds.after(music_request_system));
    update.add_systems(award_line_chips);
    update.add_systems(
        // audio bridge systems stay together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
        )
            .chain()
            .after(play_gameplay_sounds)
            .run_if(resource_exists::<AudioBridge>),
    );
    update
}
