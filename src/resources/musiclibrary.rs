//! Music track lists per game mode.
//!
//! Tracks are plain files dropped into `music/<category>/`. Every category
//! is a pool the player picks from at random; startup additionally prefers a
//! fixed `startup_theme.mp3`. An empty pool means "no music" for that mode.

use crate::resources::assetlayout::{AssetLayout, MUSIC_FORMATS, STARTUP_MUSIC_FORMATS, scan_dir};
use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::info;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Preferred startup track, looked up before the random pool.
pub const STARTUP_THEME_FILE: &str = "startup_theme.mp3";

/// Screens/modes of the game that have their own music.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Startup,
    Menu,
    Standard,
    /// Two-player split screen.
    Dual,
    /// Webcam gesture-controlled single player.
    Gesture,
    Crazy,
}

/// Music pools on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicCategory {
    Startup,
    Menu,
    Standard,
    Crazy,
}

impl MusicCategory {
    pub const ALL: [MusicCategory; 4] = [
        MusicCategory::Startup,
        MusicCategory::Menu,
        MusicCategory::Standard,
        MusicCategory::Crazy,
    ];

    /// Folder name under the music root.
    pub fn dir_name(self) -> &'static str {
        match self {
            MusicCategory::Startup => "startup",
            MusicCategory::Menu => "menu",
            MusicCategory::Standard => "standard",
            MusicCategory::Crazy => "crazy",
        }
    }

    pub fn formats(self) -> &'static [&'static str] {
        match self {
            MusicCategory::Startup => STARTUP_MUSIC_FORMATS,
            _ => MUSIC_FORMATS,
        }
    }
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Startup,
        GameMode::Menu,
        GameMode::Standard,
        GameMode::Dual,
        GameMode::Gesture,
        GameMode::Crazy,
    ];

    /// Which pool a mode draws its music from.
    pub fn music_category(self) -> MusicCategory {
        match self {
            GameMode::Startup => MusicCategory::Startup,
            GameMode::Menu => MusicCategory::Menu,
            GameMode::Crazy => MusicCategory::Crazy,
            GameMode::Standard | GameMode::Dual | GameMode::Gesture => MusicCategory::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Startup => "startup",
            GameMode::Menu => "menu",
            GameMode::Standard => "standard",
            GameMode::Dual => "dual",
            GameMode::Gesture => "gesture",
            GameMode::Crazy => "crazy",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown game mode '{}' (expected one of: startup, menu, standard, dual, gesture, crazy)",
                    s
                )
            })
    }
}

/// Track lists for every [`MusicCategory`], refreshed from disk.
#[derive(Resource, Debug, Clone, Default)]
pub struct MusicLibrary {
    startup: Vec<PathBuf>,
    menu: Vec<PathBuf>,
    standard: Vec<PathBuf>,
    crazy: Vec<PathBuf>,
    startup_theme: Option<PathBuf>,
}

impl MusicLibrary {
    /// Scan all music folders of `layout`.
    pub fn load(layout: &AssetLayout) -> Self {
        let mut library = Self::default();
        library.refresh(layout);
        library
    }

    /// Rescan all music folders, replacing the current lists.
    pub fn refresh(&mut self, layout: &AssetLayout) {
        for category in MusicCategory::ALL {
            let tracks = scan_dir(&layout.music_dir(category.dir_name()), category.formats());
            info!("Loaded {} {} tracks", tracks.len(), category.dir_name());
            *self.tracks_mut(category) = tracks;
        }

        let theme = layout
            .music_dir(MusicCategory::Startup.dir_name())
            .join(STARTUP_THEME_FILE);
        self.startup_theme = theme.is_file().then_some(theme);
    }

    pub fn tracks(&self, category: MusicCategory) -> &[PathBuf] {
        match category {
            MusicCategory::Startup => &self.startup,
            MusicCategory::Menu => &self.menu,
            MusicCategory::Standard => &self.standard,
            MusicCategory::Crazy => &self.crazy,
        }
    }

    fn tracks_mut(&mut self, category: MusicCategory) -> &mut Vec<PathBuf> {
        match category {
            MusicCategory::Startup => &mut self.startup,
            MusicCategory::Menu => &mut self.menu,
            MusicCategory::Standard => &mut self.standard,
            MusicCategory::Crazy => &mut self.crazy,
        }
    }

    /// Pick a random track from `category`, `None` when the pool is empty.
    pub fn pick(&self, category: MusicCategory, rng: &mut Rng) -> Option<PathBuf> {
        let tracks = self.tracks(category);
        if tracks.is_empty() {
            return None;
        }
        Some(tracks[rng.usize(..tracks.len())].clone())
    }

    /// Pick the track for a game mode.
    ///
    /// Startup goes through [`MusicLibrary::startup_track`]; every other mode
    /// draws from its category pool.
    pub fn pick_for_mode(&self, mode: GameMode, rng: &mut Rng) -> Option<PathBuf> {
        match mode {
            GameMode::Startup => self.startup_track(rng),
            _ => self.pick(mode.music_category(), rng),
        }
    }

    /// `startup_theme.mp3` if present, otherwise a random startup track.
    pub fn startup_track(&self, rng: &mut Rng) -> Option<PathBuf> {
        self.startup_theme
            .clone()
            .or_else(|| self.pick(MusicCategory::Startup, rng))
    }

    pub fn has_startup_theme(&self) -> bool {
        self.startup_theme.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::GameConfig;
    use std::fs;

    fn layout_in(root: &std::path::Path) -> AssetLayout {
        AssetLayout::from_config(&GameConfig::new().with_asset_root(root))
    }

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_mode_to_category() {
        assert_eq!(GameMode::Dual.music_category(), MusicCategory::Standard);
        assert_eq!(GameMode::Gesture.music_category(), MusicCategory::Standard);
        assert_eq!(GameMode::Crazy.music_category(), MusicCategory::Crazy);
        assert_eq!(GameMode::Menu.music_category(), MusicCategory::Menu);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Crazy".parse::<GameMode>().unwrap(), GameMode::Crazy);
        assert!("overdrive".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_empty_library_picks_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let library = MusicLibrary::load(&layout_in(dir.path()));
        let mut rng = Rng::with_seed(7);
        for mode in GameMode::ALL {
            assert!(library.pick_for_mode(mode, &mut rng).is_none());
        }
    }

    #[test]
    fn test_startup_prefers_theme() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        touch(layout.music_dir("startup").join("aaa_intro.ogg"));
        touch(layout.music_dir("startup").join(STARTUP_THEME_FILE));

        let library = MusicLibrary::load(&layout);
        let mut rng = Rng::with_seed(1);
        for _ in 0..8 {
            assert_eq!(
                library.startup_track(&mut rng).unwrap(),
                layout.music_dir("startup").join(STARTUP_THEME_FILE)
            );
        }
    }

    #[test]
    fn test_startup_without_theme_uses_pool_and_skips_wav() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        touch(layout.music_dir("startup").join("intro.wav"));
        touch(layout.music_dir("startup").join("intro.ogg"));

        let library = MusicLibrary::load(&layout);
        assert!(!library.has_startup_theme());
        assert_eq!(library.tracks(MusicCategory::Startup).len(), 1);
        let mut rng = Rng::with_seed(3);
        assert_eq!(
            library.startup_track(&mut rng).unwrap(),
            layout.music_dir("startup").join("intro.ogg")
        );
    }

    #[test]
    fn test_menu_accepts_wav_and_pick_stays_in_pool() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        touch(layout.music_dir("menu").join("a.wav"));
        touch(layout.music_dir("menu").join("b.mp3"));
        touch(layout.music_dir("menu").join("cover.jpg"));

        let library = MusicLibrary::load(&layout);
        let pool = library.tracks(MusicCategory::Menu).to_vec();
        assert_eq!(pool.len(), 2);

        let mut rng = Rng::with_seed(11);
        for _ in 0..16 {
            let pick = library.pick_for_mode(GameMode::Menu, &mut rng).unwrap();
            assert!(pool.contains(&pick));
        }
    }

    #[test]
    fn test_refresh_sees_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let mut library = MusicLibrary::load(&layout);
        assert!(library.tracks(MusicCategory::Crazy).is_empty());

        touch(layout.music_dir("crazy").join("fast.ogg"));
        library.refresh(&layout);
        assert_eq!(library.tracks(MusicCategory::Crazy).len(), 1);
    }
}
