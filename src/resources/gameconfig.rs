//! Game settings resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [paths]
//! music = ./music
//! sounds = ./sounds
//! images = ./assets/images
//! store = ./tetris_store_data.json
//!
//! [audio]
//! music_volume = 0.5
//! sound_volume = 1.0
//! sound_pack = default
//!
//! [gesture]
//! camera_enabled = true
//! show_camera_window = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_MUSIC_DIR: &str = "./music";
const DEFAULT_SOUNDS_DIR: &str = "./sounds";
const DEFAULT_IMAGES_DIR: &str = "./assets/images";
const DEFAULT_STORE_FILE: &str = "./tetris_store_data.json";
const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
const DEFAULT_SOUND_VOLUME: f32 = 1.0;
/// Name of the built-in sound pack (category directories, no override).
pub const DEFAULT_SOUND_PACK: &str = "default";
const DEFAULT_CAMERA_ENABLED: bool = true;
const DEFAULT_SHOW_CAMERA_WINDOW: bool = true;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Clamp a volume into the `0.0..=1.0` range. NaN becomes silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Game settings resource.
///
/// Stores asset roots, audio levels, the active sound pack and the camera
/// flags used by the gesture front end.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Root of the music directory tree (`menu/`, `standard/`, ...).
    pub music_dir: PathBuf,
    /// Root of the sound effects tree (`block_land/`, ..., `custom/`).
    pub sounds_dir: PathBuf,
    /// Root of the image tree (`buttons/`, `logo/`, `store/`).
    pub images_dir: PathBuf,
    /// JSON document holding the LineChips balance and skins.
    pub store_file: PathBuf,
    /// Music volume, `0.0..=1.0`.
    pub music_volume: f32,
    /// Sound effects volume, `0.0..=1.0`.
    pub sound_volume: f32,
    /// Active sound pack folder name under `sounds/custom/`.
    pub sound_pack: String,
    pub camera_enabled: bool,
    pub show_camera_window: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            music_dir: PathBuf::from(DEFAULT_MUSIC_DIR),
            sounds_dir: PathBuf::from(DEFAULT_SOUNDS_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            store_file: PathBuf::from(DEFAULT_STORE_FILE),
            music_volume: DEFAULT_MUSIC_VOLUME,
            sound_volume: DEFAULT_SOUND_VOLUME,
            sound_pack: DEFAULT_SOUND_PACK.to_string(),
            camera_enabled: DEFAULT_CAMERA_ENABLED,
            show_camera_window: DEFAULT_SHOW_CAMERA_WINDOW,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Re-root every asset path under `base`.
    ///
    /// Keeps the default sub-layout (`music`, `sounds`, `assets/images`,
    /// store file) but places it inside another directory.
    pub fn with_asset_root(mut self, base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        self.music_dir = base.join("music");
        self.sounds_dir = base.join("sounds");
        self.images_dir = base.join("assets").join("images");
        self.store_file = base.join("tetris_store_data.json");
        self
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [paths] section
        if let Some(dir) = config.get("paths", "music") {
            self.music_dir = PathBuf::from(dir);
        }
        if let Some(dir) = config.get("paths", "sounds") {
            self.sounds_dir = PathBuf::from(dir);
        }
        if let Some(dir) = config.get("paths", "images") {
            self.images_dir = PathBuf::from(dir);
        }
        if let Some(file) = config.get("paths", "store") {
            self.store_file = PathBuf::from(file);
        }

        // [audio] section
        if let Some(vol) = config.getfloat("audio", "music_volume").ok().flatten() {
            self.music_volume = clamp_volume(vol as f32);
        }
        if let Some(vol) = config.getfloat("audio", "sound_volume").ok().flatten() {
            self.sound_volume = clamp_volume(vol as f32);
        }
        if let Some(pack) = config.get("audio", "sound_pack") {
            let pack = pack.trim();
            if !pack.is_empty() {
                self.sound_pack = pack.to_string();
            }
        }

        // [gesture] section
        if let Some(enabled) = config.getbool("gesture", "camera_enabled").ok().flatten() {
            self.camera_enabled = enabled;
        }
        if let Some(show) = config
            .getbool("gesture", "show_camera_window")
            .ok()
            .flatten()
        {
            self.show_camera_window = show;
        }

        info!(
            "Loaded config: music={:?} sounds={:?} images={:?} store={:?} music_vol={} sound_vol={} pack={}",
            self.music_dir,
            self.sounds_dir,
            self.images_dir,
            self.store_file,
            self.music_volume,
            self.sound_volume,
            self.sound_pack
        );

        Ok(())
    }

    /// Load the INI file, writing one with the current values if it is missing.
    pub fn load_or_create(&mut self) -> Result<(), String> {
        if self.config_path.exists() {
            return self.load_from_file();
        }
        info!("No config file at {:?}, writing defaults", self.config_path);
        self.save_to_file()
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("paths", "music", Some(self.music_dir.display().to_string()));
        config.set("paths", "sounds", Some(self.sounds_dir.display().to_string()));
        config.set("paths", "images", Some(self.images_dir.display().to_string()));
        config.set("paths", "store", Some(self.store_file.display().to_string()));

        config.set("audio", "music_volume", Some(self.music_volume.to_string()));
        config.set("audio", "sound_volume", Some(self.sound_volume.to_string()));
        config.set("audio", "sound_pack", Some(self.sound_pack.clone()));

        config.set(
            "gesture",
            "camera_enabled",
            Some(self.camera_enabled.to_string()),
        );
        config.set(
            "gesture",
            "show_camera_window",
            Some(self.show_camera_window.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set the music volume (clamped).
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    /// Set the sound effects volume (clamped).
    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = clamp_volume(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_layout() {
        let config = GameConfig::new();
        assert_eq!(config.music_dir, PathBuf::from("./music"));
        assert_eq!(config.sounds_dir, PathBuf::from("./sounds"));
        assert_eq!(config.images_dir, PathBuf::from("./assets/images"));
        assert_eq!(config.music_volume, 0.5);
        assert_eq!(config.sound_volume, 1.0);
        assert_eq!(config.sound_pack, DEFAULT_SOUND_PACK);
        assert!(config.camera_enabled);
    }

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(-1.0), 0.0);
        assert_eq!(clamp_volume(0.25), 0.25);
        assert_eq!(clamp_volume(3.0), 1.0);
        assert_eq!(clamp_volume(f32::NAN), 0.0);
    }

    #[test]
    fn test_load_missing_file_is_error_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GameConfig::with_path(dir.path().join("nope.ini"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.music_volume, 0.5);
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = GameConfig::with_path(&path);
        config.load_or_create().unwrap();
        assert!(path.is_file());
        assert_eq!(config, GameConfig::with_path(&path));

        std::fs::write(&path, "[audio]\nmusic_volume = 0.2\n").unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_or_create().unwrap();
        assert!((config.music_volume - 0.2).abs() < 1e-6);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[audio]\nmusic_volume = 0.2\n"
        );
    }

    #[test]
    fn test_load_partial_file_clamps_and_keeps_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(
            &path,
            "[audio]\nmusic_volume = 1.7\nsound_pack = retro_pack\n[gesture]\ncamera_enabled = false\n",
        )
        .unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.music_volume, 1.0);
        assert_eq!(config.sound_volume, 1.0);
        assert_eq!(config.sound_pack, "retro_pack");
        assert!(!config.camera_enabled);
        assert!(config.show_camera_window);
        assert_eq!(config.music_dir, PathBuf::from("./music"));
    }

    #[test]
    fn test_save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = GameConfig::with_path(&path).with_asset_root(dir.path());
        config.set_sound_volume(0.3);
        config.sound_pack = "arcade".to_string();
        config.save_to_file().unwrap();

        let mut reloaded = GameConfig::with_path(&path);
        reloaded.load_from_file().unwrap();
        assert_eq!(reloaded.sound_pack, "arcade");
        assert!((reloaded.sound_volume - 0.3).abs() < 1e-6);
        assert_eq!(reloaded.music_dir, dir.path().join("music"));
    }
}
