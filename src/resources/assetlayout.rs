//! Asset directory taxonomy.
//!
//! [`AssetLayout`] turns the configured roots into the concrete folders the
//! game looks into, and owns the format tables for each asset family. All
//! lookups treat a missing directory as empty: user-supplied assets are
//! optional and every caller has a built-in fallback.

use crate::resources::gameconfig::GameConfig;
use bevy_ecs::prelude::Resource;
use log::debug;
use std::path::{Path, PathBuf};

/// Formats accepted for startup music.
pub const STARTUP_MUSIC_FORMATS: &[&str] = &["mp3", "ogg"];
/// Formats accepted for menu and gameplay music.
pub const MUSIC_FORMATS: &[&str] = &["mp3", "ogg", "wav"];
/// Formats accepted for sound effects, in sound-pack preference order.
pub const SOUND_FORMATS: &[&str] = &["wav", "mp3", "ogg"];
/// Formats accepted for images, in preference order (PNG first).
pub const IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Folder holding user sound packs, relative to the sounds root.
pub const CUSTOM_SOUNDS_DIR: &str = "custom";

/// Concrete asset folders derived from [`GameConfig`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    pub music_root: PathBuf,
    pub sounds_root: PathBuf,
    pub images_root: PathBuf,
}

impl AssetLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            music_root: config.music_dir.clone(),
            sounds_root: config.sounds_dir.clone(),
            images_root: config.images_dir.clone(),
        }
    }

    /// `music/<sub>`
    pub fn music_dir(&self, sub: &str) -> PathBuf {
        self.music_root.join(sub)
    }

    /// `sounds/<category>`
    pub fn sound_dir(&self, category: &str) -> PathBuf {
        self.sounds_root.join(category)
    }

    /// `sounds/custom`
    pub fn custom_sounds_dir(&self) -> PathBuf {
        self.sounds_root.join(CUSTOM_SOUNDS_DIR)
    }

    /// `sounds/custom/<pack>`
    pub fn sound_pack_dir(&self, pack: &str) -> PathBuf {
        self.custom_sounds_dir().join(pack)
    }

    /// `assets/images/<sub>`
    pub fn image_dir(&self, sub: &str) -> PathBuf {
        self.images_root.join(sub)
    }
}

/// Whether `path` has one of `formats` as extension (case-insensitive).
pub fn has_format(path: &Path, formats: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| formats.iter().any(|f| f.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List the files in `dir` whose extension is in `formats`, sorted by name.
///
/// A missing or unreadable directory yields an empty list.
pub fn scan_dir(dir: &Path, formats: &[&str]) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Asset directory {:?} not readable: {}", dir, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_format(path, formats))
        .collect();
    files.sort();
    files
}

/// Find `<stem>.<ext>` in `dir`, trying `formats` in order.
///
/// Extensions are compared case-insensitively, so `Logo.PNG` matches
/// `logo` + `png` only when the stem also matches exactly.
pub fn find_with_formats(dir: &Path, stem: &str, formats: &[&str]) -> Option<PathBuf> {
    let candidates = scan_dir(dir, formats);
    formats.iter().find_map(|format| {
        candidates
            .iter()
            .find(|path| {
                path.file_stem().and_then(|s| s.to_str()) == Some(stem)
                    && has_format(path, &[format])
            })
            .cloned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_layout_follows_config_roots() {
        let config = GameConfig::new().with_asset_root("/tmp/getrix");
        let layout = AssetLayout::from_config(&config);
        assert_eq!(
            layout.music_dir("menu"),
            PathBuf::from("/tmp/getrix/music/menu")
        );
        assert_eq!(
            layout.sound_pack_dir("arcade"),
            PathBuf::from("/tmp/getrix/sounds/custom/arcade")
        );
        assert_eq!(
            layout.image_dir("logo"),
            PathBuf::from("/tmp/getrix/assets/images/logo")
        );
    }

    #[test]
    fn test_has_format_is_case_insensitive() {
        assert!(has_format(Path::new("a/b/Theme.MP3"), MUSIC_FORMATS));
        assert!(!has_format(Path::new("a/b/theme.flac"), MUSIC_FORMATS));
        assert!(!has_format(Path::new("a/b/README"), MUSIC_FORMATS));
    }

    #[test]
    fn test_scan_dir_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.ogg", "a.mp3", "notes.txt", "c.wav"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.mp3")).unwrap();

        let found = scan_dir(dir.path(), STARTUP_MUSIC_FORMATS);
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.ogg"]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_dir(&dir.path().join("missing"), MUSIC_FORMATS).is_empty());
    }

    #[test]
    fn test_find_with_formats_respects_preference() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.jpg"), b"x").unwrap();
        fs::write(dir.path().join("logo.png"), b"x").unwrap();
        fs::write(dir.path().join("logo_old.png"), b"x").unwrap();

        let found = find_with_formats(dir.path(), "logo", IMAGE_FORMATS).unwrap();
        assert_eq!(found, dir.path().join("logo.png"));
        assert!(find_with_formats(dir.path(), "icon", IMAGE_FORMATS).is_none());
    }
}
