//! Gameplay sound effects.
//!
//! Each [`GameplayEvent`] that has a sound is resolved through the
//! [`SoundBank`] (active pack first, then a random file of the category) and
//! turned into `LoadFx`/`PlayFx` commands. Files are loaded on the audio
//! thread the first time they are picked and reused afterwards.

use crate::events::audio::AudioCmd;
use crate::events::gameplay::{GameplayEvent, SoundRequest};
use crate::resources::musicplayer::{AudioRng, MusicPlayer};
use crate::resources::soundbank::{SoundBank, SoundEffect};
use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashSet;

/// Play the effect for every gameplay event and explicit [`SoundRequest`].
pub fn play_gameplay_sounds(
    mut events: MessageReader<GameplayEvent>,
    mut requests: MessageReader<SoundRequest>,
    bank: Res<SoundBank>,
    player: Res<MusicPlayer>,
    mut rng: ResMut<AudioRng>,
    mut loaded: Local<FxHashSet<String>>,
    mut cmds: MessageWriter<AudioCmd>,
) {
    let effects = events
        .read()
        .filter_map(|event| event.sound_effect())
        .chain(requests.read().map(|request| request.0));

    for effect in effects {
        play_effect(
            effect,
            &bank,
            player.sound_volume(),
            &mut rng,
            &mut loaded,
            &mut cmds,
        );
    }
}

fn play_effect(
    effect: SoundEffect,
    bank: &SoundBank,
    volume: f32,
    rng: &mut AudioRng,
    loaded: &mut FxHashSet<String>,
    cmds: &mut MessageWriter<AudioCmd>,
) {
    let source = bank.resolve(effect, &mut rng.0);
    let Some(path) = source.path() else {
        return;
    };
    let id = path.to_string_lossy().into_owned();
    if loaded.insert(id.clone()) {
        debug!("Loading {} sound from {}", effect, id);
        cmds.write(AudioCmd::LoadFx {
            id: id.clone(),
            path: id.clone(),
        });
    }
    cmds.write(AudioCmd::PlayFx { id, vol: volume });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assetlayout::AssetLayout;
    use crate::resources::gameconfig::GameConfig;
    use bevy_ecs::system::SystemState;
    use std::fs;
    use std::path::Path;

    fn setup(root: &Path) -> (World, Schedule) {
        let layout = AssetLayout::from_config(&GameConfig::new().with_asset_root(root));
        let mut world = World::new();
        world.insert_resource(SoundBank::load(&layout));
        world.insert_resource(MusicPlayer::new(0.5, 0.8));
        world.insert_resource(AudioRng::with_seed(3));
        world.init_resource::<Messages<GameplayEvent>>();
        world.init_resource::<Messages<SoundRequest>>();
        world.init_resource::<Messages<AudioCmd>>();
        let mut schedule = Schedule::default();
        schedule.add_systems(play_gameplay_sounds);
        (world, schedule)
    }

    #[test]
    fn test_effect_loads_once_then_plays() {
        let dir = tempfile::tempdir().unwrap();
        let land = dir.path().join("sounds/block_land");
        fs::create_dir_all(&land).unwrap();
        fs::write(land.join("thud.wav"), b"x").unwrap();

        let (mut world, mut schedule) = setup(dir.path());
        let mut reader = SystemState::<MessageReader<AudioCmd>>::new(&mut world);

        world
            .resource_mut::<Messages<GameplayEvent>>()
            .write(GameplayEvent::BlockLanded);
        schedule.run(&mut world);
        let first: Vec<AudioCmd> = reader.get_mut(&mut world).read().cloned().collect();
        assert_eq!(first.len(), 2);
        assert!(matches!(&first[0], AudioCmd::LoadFx { path, .. } if path.ends_with("thud.wav")));
        assert!(matches!(&first[1], AudioCmd::PlayFx { vol, .. } if (*vol - 0.8).abs() < 1e-6));

        world
            .resource_mut::<Messages<GameplayEvent>>()
            .write(GameplayEvent::BlockLanded);
        schedule.run(&mut world);
        let second: Vec<AudioCmd> = reader.get_mut(&mut world).read().cloned().collect();
        assert_eq!(second.len(), 1);
        assert!(matches!(second[0], AudioCmd::PlayFx { .. }));
    }

    #[test]
    fn test_silent_and_zero_lines_emit_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut world, mut schedule) = setup(dir.path());
        let mut reader = SystemState::<MessageReader<AudioCmd>>::new(&mut world);

        {
            let mut events = world.resource_mut::<Messages<GameplayEvent>>();
            events.write(GameplayEvent::GameOver);
            events.write(GameplayEvent::LinesCleared { lines: 0 });
        }
        world
            .resource_mut::<Messages<SoundRequest>>()
            .write(SoundRequest(SoundEffect::LevelUp));
        schedule.run(&mut world);
        assert_eq!(reader.get_mut(&mut world).read().count(), 0);
    }

    #[test]
    fn test_zero_lines_has_no_effect() {
        assert_eq!(GameplayEvent::LinesCleared { lines: 0 }.sound_effect(), None);
        assert_eq!(
            GameplayEvent::LinesCleared { lines: 4 }.sound_effect(),
            Some(SoundEffect::LineClear)
        );
    }
}
