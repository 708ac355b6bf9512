//! Asset folder generator.
//!
//! Creates the music, sound and image folders the game looks in and drops a
//! `README.txt` into each root explaining which files go where. Existing
//! folders and README files are left as they are, so running it twice is
//! harmless.

use crate::resources::assetlayout::{
    AssetLayout, CUSTOM_SOUNDS_DIR, IMAGE_FORMATS, MUSIC_FORMATS, SOUND_FORMATS,
    STARTUP_MUSIC_FORMATS,
};
use crate::resources::imagecatalog::{ButtonKind, ButtonState, LogoImage, StoreImage};
use crate::resources::musiclibrary::{MusicCategory, STARTUP_THEME_FILE};
use crate::resources::soundbank::SoundEffect;
use log::{debug, info};
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

pub const README_FILE: &str = "README.txt";

/// Every folder of the layout, parents before children.
pub fn layout_dirs(layout: &AssetLayout) -> Vec<PathBuf> {
    let mut dirs = vec![layout.music_root.clone()];
    dirs.extend(
        MusicCategory::ALL
            .iter()
            .map(|c| layout.music_dir(c.dir_name())),
    );
    dirs.push(layout.sounds_root.clone());
    dirs.extend(SoundEffect::ALL.iter().map(|e| layout.sound_dir(e.as_str())));
    dirs.push(layout.custom_sounds_dir());
    dirs.push(layout.images_root.clone());
    dirs.push(layout.image_dir("buttons"));
    dirs.extend(
        ButtonKind::ALL
            .iter()
            .map(|k| layout.image_dir("buttons").join(k.dir_name())),
    );
    dirs.push(layout.image_dir("logo"));
    dirs.push(layout.image_dir("store"));
    dirs
}

fn join_formats(formats: &[&str]) -> String {
    formats.join(", ")
}

fn music_readme() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Music folders");
    let _ = writeln!(out, "=============");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "startup/   played once at launch ({}). A file named {} always wins,",
        join_formats(STARTUP_MUSIC_FORMATS),
        STARTUP_THEME_FILE
    );
    let _ = writeln!(out, "           otherwise a random track is used.");
    let _ = writeln!(
        out,
        "menu/      main menu loop ({})",
        join_formats(MUSIC_FORMATS)
    );
    let _ = writeln!(
        out,
        "standard/  standard, dual and gesture games ({})",
        join_formats(MUSIC_FORMATS)
    );
    let _ = writeln!(
        out,
        "crazy/     crazy mode ({})",
        join_formats(MUSIC_FORMATS)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "A random track is chosen each time a mode starts. Empty folders mean silence."
    );
    out
}

fn sounds_readme() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sound effects");
    let _ = writeln!(out, "=============");
    let _ = writeln!(out);
    for effect in SoundEffect::ALL {
        let _ = writeln!(out, "{}/", effect.as_str());
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Put any number of {} files in a folder; one is picked at random each time.",
        join_formats(SOUND_FORMATS)
    );
    let _ = writeln!(
        out,
        "An empty folder keeps that effect silent. See {}/ for sound packs.",
        CUSTOM_SOUNDS_DIR
    );
    out
}

fn custom_sounds_readme() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Custom sound packs");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Create one folder per pack, e.g. {}/arcade/, holding:", CUSTOM_SOUNDS_DIR);
    for effect in SoundEffect::ALL {
        let _ = writeln!(
            out,
            "  {}.<{}>",
            effect.as_str(),
            SOUND_FORMATS.join("|")
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Select it with `getrix --sound-pack arcade`. Missing files fall back to the"
    );
    let _ = writeln!(out, "regular effect folders.");
    out
}

fn images_readme() -> String {
    let formats = join_formats(IMAGE_FORMATS);
    let mut out = String::new();
    let _ = writeln!(out, "Images");
    let _ = writeln!(out, "======");
    let _ = writeln!(out);
    let _ = writeln!(out, "Accepted formats, in order of preference: {}", formats);
    let _ = writeln!(out);
    for kind in ButtonKind::ALL {
        let states: Vec<&str> = ButtonState::ALL.iter().map(|s| s.file_stem()).collect();
        let _ = writeln!(
            out,
            "buttons/{}/  {}",
            kind.dir_name(),
            states.join(", ")
        );
    }
    let _ = writeln!(
        out,
        "  A missing hover or pressed image reuses the normal one; no image at all"
    );
    let _ = writeln!(out, "  keeps the drawn button.");
    let _ = writeln!(
        out,
        "logo/  {} (title), {} (window icon)",
        LogoImage::Title.file_stem(),
        LogoImage::Icon.file_stem()
    );
    let _ = writeln!(
        out,
        "store/ {}, {}, {}",
        StoreImage::Background.file_stem(),
        StoreImage::LineChip.file_stem(),
        StoreImage::SkinPreview("<skin id>".to_string()).file_stem()
    );
    out
}

/// README files to create, as `(path, content)`.
pub fn generate_readmes(layout: &AssetLayout) -> Vec<(PathBuf, String)> {
    vec![
        (layout.music_root.join(README_FILE), music_readme()),
        (layout.sounds_root.join(README_FILE), sounds_readme()),
        (
            layout.custom_sounds_dir().join(README_FILE),
            custom_sounds_readme(),
        ),
        (layout.images_root.join(README_FILE), images_readme()),
    ]
}

fn create_dir(path: &Path) -> Result<bool, String> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)
        .map(|_| true)
        .map_err(|e| format!("Failed to create {}: {e}", path.display()))
}

/// Create every missing folder and README. Returns what was created.
pub fn init_layout(layout: &AssetLayout) -> Result<Vec<PathBuf>, String> {
    let mut created = Vec::new();
    for dir in layout_dirs(layout) {
        if create_dir(&dir)? {
            debug!("Created {}", dir.display());
            created.push(dir);
        }
    }
    for (path, content) in generate_readmes(layout) {
        if path.exists() {
            continue;
        }
        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        created.push(path);
    }
    info!("Asset layout ready, {} entries created", created.len());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::GameConfig;

    fn layout_in(root: &Path) -> AssetLayout {
        AssetLayout::from_config(&GameConfig::new().with_asset_root(root))
    }

    #[test]
    fn test_readmes_mention_conventions() {
        let dir = tempfile::tempdir().unwrap();
        let readmes = generate_readmes(&layout_in(dir.path()));
        assert_eq!(readmes.len(), 4);
        assert!(readmes[0].1.contains(STARTUP_THEME_FILE));
        assert!(readmes[2].1.contains("line_clear.<wav|mp3|ogg>"));
        assert!(readmes[3].1.contains("button_hover"));
    }

    #[test]
    fn test_layout_dirs_parents_first() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let dirs = layout_dirs(&layout);
        let pos = |p: &Path| dirs.iter().position(|d| d == p).unwrap();
        assert!(pos(&layout.sounds_root) < pos(&layout.custom_sounds_dir()));
        assert!(pos(&layout.image_dir("buttons")) < pos(&layout.image_dir("buttons").join("duel")));
    }
}
