//! Sound effect resolution.
//!
//! Each effect has a category folder (`sounds/block_land/`, ...) acting as a
//! random pool. A sound pack (`sounds/custom/<pack>/`) overrides effects by
//! fixed file name (`block_land.wav`, ...). With neither, the effect is
//! silent.

use crate::resources::assetlayout::{AssetLayout, SOUND_FORMATS, find_with_formats, scan_dir};
use crate::resources::gameconfig::DEFAULT_SOUND_PACK;
use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Gameplay sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    BlockLand,
    LineClear,
    LevelUp,
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::BlockLand,
        SoundEffect::LineClear,
        SoundEffect::LevelUp,
        SoundEffect::GameOver,
    ];

    /// Category folder name, also the fixed file stem inside sound packs.
    pub fn as_str(self) -> &'static str {
        match self {
            SoundEffect::BlockLand => "block_land",
            SoundEffect::LineClear => "line_clear",
            SoundEffect::LevelUp => "level_up",
            SoundEffect::GameOver => "game_over",
        }
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundEffect::ALL
            .into_iter()
            .find(|fx| fx.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown sound effect '{}' (expected one of: block_land, line_clear, level_up, game_over)",
                    s
                )
            })
    }
}

/// Where a sound effect comes from after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// Fixed-name file of the active sound pack.
    Pack(PathBuf),
    /// Random pick from the effect's category folder.
    Category(PathBuf),
    /// Nothing to play.
    Silent,
}

impl SoundSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            SoundSource::Pack(path) | SoundSource::Category(path) => Some(path),
            SoundSource::Silent => None,
        }
    }
}

type Candidates = SmallVec<[PathBuf; 4]>;

/// Sound effect pools and the active sound pack.
#[derive(Resource, Debug, Clone)]
pub struct SoundBank {
    layout: AssetLayout,
    pools: FxHashMap<SoundEffect, Candidates>,
    active_pack: String,
    pack_files: FxHashMap<SoundEffect, PathBuf>,
}

impl SoundBank {
    /// Scan the effect folders of `layout`; starts on the default pack.
    pub fn load(layout: &AssetLayout) -> Self {
        let mut bank = Self {
            layout: layout.clone(),
            pools: FxHashMap::default(),
            active_pack: DEFAULT_SOUND_PACK.to_string(),
            pack_files: FxHashMap::default(),
        };
        bank.refresh();
        bank
    }

    /// Scan `layout` and switch to `pack`, staying on the default pack when
    /// it is unusable.
    pub fn load_with_pack(layout: &AssetLayout, pack: &str) -> Self {
        let mut bank = Self::load(layout);
        if let Err(e) = bank.set_active_pack(pack) {
            warn!("Ignoring configured sound pack: {}", e);
        }
        bank
    }

    /// Rescan the category folders and the active pack.
    pub fn refresh(&mut self) {
        self.pools.clear();
        for effect in SoundEffect::ALL {
            let files: Candidates = scan_dir(&self.layout.sound_dir(effect.as_str()), SOUND_FORMATS)
                .into_iter()
                .collect();
            info!("Found {} {} sounds", files.len(), effect);
            self.pools.insert(effect, files);
        }
        if self.active_pack != DEFAULT_SOUND_PACK {
            self.pack_files = self.scan_pack(&self.active_pack);
        }
    }

    pub fn candidates(&self, effect: SoundEffect) -> &[PathBuf] {
        self.pools
            .get(&effect)
            .map(|files| files.as_slice())
            .unwrap_or(&[])
    }

    pub fn active_pack(&self) -> &str {
        &self.active_pack
    }

    fn scan_pack(&self, pack: &str) -> FxHashMap<SoundEffect, PathBuf> {
        let dir = self.layout.sound_pack_dir(pack);
        SoundEffect::ALL
            .into_iter()
            .filter_map(|effect| {
                find_with_formats(&dir, effect.as_str(), SOUND_FORMATS).map(|path| (effect, path))
            })
            .collect()
    }

    /// Switch to another sound pack.
    ///
    /// `"default"` always succeeds. Any other name must be a folder under
    /// `sounds/custom/` holding at least one fixed-name effect file;
    /// otherwise the active pack is left unchanged.
    pub fn set_active_pack(&mut self, pack: &str) -> Result<(), String> {
        let pack = pack.trim();
        if pack.is_empty() || pack == DEFAULT_SOUND_PACK {
            self.active_pack = DEFAULT_SOUND_PACK.to_string();
            self.pack_files.clear();
            info!("Sound pack set to default");
            return Ok(());
        }
        if pack.contains(['/', '\\']) || pack == "." || pack == ".." {
            return Err(format!("Invalid sound pack name '{}'", pack));
        }

        let dir = self.layout.sound_pack_dir(pack);
        if !dir.is_dir() {
            return Err(format!("Sound pack '{}' not found in {:?}", pack, dir));
        }
        let files = self.scan_pack(pack);
        if files.is_empty() {
            return Err(format!(
                "Sound pack '{}' has no block_land/line_clear/level_up/game_over files",
                pack
            ));
        }

        info!(
            "Sound pack set to '{}' ({} of {} effects overridden)",
            pack,
            files.len(),
            SoundEffect::ALL.len()
        );
        self.active_pack = pack.to_string();
        self.pack_files = files;
        Ok(())
    }

    /// Resolve the file to play for `effect`.
    pub fn resolve(&self, effect: SoundEffect, rng: &mut Rng) -> SoundSource {
        if let Some(path) = self.pack_files.get(&effect) {
            return SoundSource::Pack(path.clone());
        }
        let pool = self.candidates(effect);
        if pool.is_empty() {
            debug!("No sounds available for {}", effect);
            return SoundSource::Silent;
        }
        SoundSource::Category(pool[rng.usize(..pool.len())].clone())
    }
}
