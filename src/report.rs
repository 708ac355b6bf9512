//! Human-readable summaries for the command line.
//!
//! [`asset_report`] lists how every asset slot resolves against the current
//! folders, [`store_report`] prints the LineChips balance and skin catalog.
//! Both return plain text so they can be checked in tests.

use crate::resources::imagecatalog::{
    ButtonKind, ButtonState, ImageCatalog, ImageSource, LogoImage, StoreImage,
};
use crate::resources::musiclibrary::{MusicCategory, MusicLibrary};
use crate::resources::soundbank::{SoundBank, SoundEffect, SoundSource};
use crate::resources::store::{SkinTier, Store, default_catalog};
use std::fmt::Write as FmtWrite;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn describe_image(source: &ImageSource) -> String {
    match source {
        ImageSource::File(path) => path.display().to_string(),
        ImageSource::DrawnShape => "drawn shape".to_string(),
        ImageSource::Builtin => "built-in".to_string(),
    }
}

pub fn asset_report(library: &MusicLibrary, bank: &SoundBank, images: &ImageCatalog) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Music");
    for category in MusicCategory::ALL {
        let tracks = library.tracks(category);
        let names: Vec<String> = tracks.iter().map(|t| file_name(t)).collect();
        let listing = if names.is_empty() {
            "silent".to_string()
        } else {
            names.join(", ")
        };
        let _ = writeln!(
            out,
            "  {:<9} {} track(s): {}",
            category.dir_name(),
            tracks.len(),
            listing
        );
    }
    if library.has_startup_theme() {
        let _ = writeln!(out, "  startup theme present");
    }

    let _ = writeln!(out, "Sounds (pack: {})", bank.active_pack());
    for effect in SoundEffect::ALL {
        let pool = bank.candidates(effect).len();
        // resolve with a fixed seed: only the kind of source matters here
        let source = bank.resolve(effect, &mut fastrand::Rng::with_seed(0));
        let from = match &source {
            SoundSource::Pack(path) => format!("pack file {}", file_name(path)),
            SoundSource::Category(_) => format!("random of {}", pool),
            SoundSource::Silent => "silent".to_string(),
        };
        let _ = writeln!(out, "  {:<10} {}", effect.as_str(), from);
    }

    let _ = writeln!(out, "Buttons");
    for kind in ButtonKind::ALL {
        for state in ButtonState::ALL {
            let _ = writeln!(
                out,
                "  {:<8} {:<14} {}",
                kind.dir_name(),
                state.file_stem(),
                describe_image(&images.button(kind, state))
            );
        }
    }

    let _ = writeln!(out, "Logo");
    for logo in LogoImage::ALL {
        let _ = writeln!(
            out,
            "  {:<10} {}",
            logo.file_stem(),
            describe_image(&images.logo(logo))
        );
    }

    let _ = writeln!(out, "Store");
    let previews = default_catalog()
        .into_keys()
        .map(StoreImage::SkinPreview);
    for image in [StoreImage::Background, StoreImage::LineChip]
        .into_iter()
        .chain(previews)
    {
        let _ = writeln!(
            out,
            "  {:<10} {}",
            image.file_stem(),
            describe_image(&images.store(&image))
        );
    }
    out
}

pub fn store_report(store: &Store) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "LineChips: {}", store.line_chips());
    let _ = writeln!(out, "Active skin: {}", store.active_skin_id());
    for (id, skin) in store.skins() {
        let tier = match skin.tier {
            SkinTier::Basic => "basic",
            SkinTier::Special => "special",
        };
        let status = if id == store.active_skin_id() {
            "active"
        } else if skin.owned {
            "owned"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {:<10} {:<8} {:>3}  {:<7} {}",
            id, tier, skin.price, status, skin.name
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assetlayout::AssetLayout;
    use crate::resources::gameconfig::GameConfig;
    use std::fs;

    #[test]
    fn test_asset_report_on_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::from_config(&GameConfig::new().with_asset_root(dir.path()));
        let logo_dir = layout.image_dir("logo");
        fs::create_dir_all(&logo_dir).unwrap();
        fs::write(logo_dir.join("logo.png"), b"x").unwrap();

        let report = asset_report(
            &MusicLibrary::load(&layout),
            &SoundBank::load(&layout),
            &ImageCatalog::new(&layout),
        );
        assert!(report.contains("menu      0 track(s): silent"));
        assert!(report.contains("game_over  silent"));
        assert!(report.contains("drawn shape"));
        assert!(report.contains("logo.png"));
        assert!(report.contains("icon       built-in"));
        assert!(report.contains("skin_default built-in"));
    }

    #[test]
    fn test_asset_report_lists_every_skin_preview() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::from_config(&GameConfig::new().with_asset_root(dir.path()));
        let store_dir = layout.image_dir("store");
        fs::create_dir_all(&store_dir).unwrap();
        fs::write(store_dir.join("skin_neon.png"), b"x").unwrap();

        let report = asset_report(
            &MusicLibrary::load(&layout),
            &SoundBank::load(&layout),
            &ImageCatalog::new(&layout),
        );
        for id in default_catalog().keys() {
            assert!(report.contains(&format!("skin_{}", id)), "no row for {}", id);
        }
        assert!(report.contains("skin_neon.png"));
        assert!(report.contains("skin_glossy built-in"));
    }

    #[test]
    fn test_store_report_marks_active() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("store.json"));
        let report = store_report(&store);
        assert!(report.starts_with("LineChips: 0"));
        assert!(report.contains("default"));
        assert!(report.contains("active"));
    }
}
