//! Image resolution for buttons, logo and store art.
//!
//! Images are optional overrides. A button looks for
//! `buttons/<kind>/button_<state>.<ext>`, falls back to its normal-state
//! image and finally to the drawn shape the UI renders itself. Logo and
//! store images fall back to built-in art.

use crate::resources::assetlayout::{AssetLayout, IMAGE_FORMATS, find_with_formats};
use bevy_ecs::prelude::Resource;
use log::debug;
use std::path::PathBuf;

/// Menu buttons that accept custom images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Standard,
    Duel,
    Gesture,
    Controls,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 4] = [
        ButtonKind::Standard,
        ButtonKind::Duel,
        ButtonKind::Gesture,
        ButtonKind::Controls,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            ButtonKind::Standard => "standard",
            ButtonKind::Duel => "duel",
            ButtonKind::Gesture => "gesture",
            ButtonKind::Controls => "controls",
        }
    }

    /// Guess the button kind from its label.
    ///
    /// "Duel" wins over "Standard" so "Standard Duel" lands in `duel/`.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains("Duel") {
            Some(ButtonKind::Duel)
        } else if label.contains("Standard") {
            Some(ButtonKind::Standard)
        } else if label.contains("Gesture") {
            Some(ButtonKind::Gesture)
        } else if label.contains("Controls") {
            Some(ButtonKind::Controls)
        } else {
            None
        }
    }
}

/// Visual state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Normal,
    Hover,
    Pressed,
}

impl ButtonState {
    pub const ALL: [ButtonState; 3] = [ButtonState::Normal, ButtonState::Hover, ButtonState::Pressed];

    /// File stem, e.g. `button_normal`.
    pub fn file_stem(self) -> &'static str {
        match self {
            ButtonState::Normal => "button_normal",
            ButtonState::Hover => "button_hover",
            ButtonState::Pressed => "button_pressed",
        }
    }
}

/// Images under `logo/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoImage {
    /// Title logo on the startup and menu screens.
    Title,
    /// Window icon.
    Icon,
}

impl LogoImage {
    pub const ALL: [LogoImage; 2] = [LogoImage::Title, LogoImage::Icon];

    pub fn file_stem(self) -> &'static str {
        match self {
            LogoImage::Title => "logo",
            LogoImage::Icon => "icon",
        }
    }
}

/// Images under `store/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreImage {
    Background,
    LineChip,
    /// Preview for a skin id, `skin_<id>`.
    SkinPreview(String),
}

impl StoreImage {
    pub fn file_stem(&self) -> String {
        match self {
            StoreImage::Background => "background".to_string(),
            StoreImage::LineChip => "line_chip".to_string(),
            StoreImage::SkinPreview(id) => format!("skin_{}", id),
        }
    }
}

/// Outcome of an image lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    /// The UI draws the button shape itself.
    DrawnShape,
    /// Built-in art bundled with the game.
    Builtin,
}

impl ImageSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ImageSource::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Resolves images against the `assets/images` tree.
///
/// Lookups hit the filesystem each time, so files added while the game runs
/// are picked up the next time a screen is built.
#[derive(Resource, Debug, Clone)]
pub struct ImageCatalog {
    layout: AssetLayout,
}

impl ImageCatalog {
    pub fn new(layout: &AssetLayout) -> Self {
        Self {
            layout: layout.clone(),
        }
    }

    /// Folder for a button kind, `buttons/<kind>`.
    pub fn button_dir(&self, kind: ButtonKind) -> PathBuf {
        self.layout.image_dir("buttons").join(kind.dir_name())
    }

    pub fn button(&self, kind: ButtonKind, state: ButtonState) -> ImageSource {
        let dir = self.button_dir(kind);
        let found = find_with_formats(&dir, state.file_stem(), IMAGE_FORMATS).or_else(|| {
            if state == ButtonState::Normal {
                None
            } else {
                find_with_formats(&dir, ButtonState::Normal.file_stem(), IMAGE_FORMATS)
            }
        });
        match found {
            Some(path) => ImageSource::File(path),
            None => {
                debug!("No image for {:?} button ({:?}), drawing shape", kind, state);
                ImageSource::DrawnShape
            }
        }
    }

    /// Resolve a button from its label; unknown labels are drawn.
    pub fn button_for_label(&self, label: &str, state: ButtonState) -> ImageSource {
        match ButtonKind::from_label(label) {
            Some(kind) => self.button(kind, state),
            None => ImageSource::DrawnShape,
        }
    }

    pub fn logo(&self, image: LogoImage) -> ImageSource {
        self.lookup("logo", image.file_stem())
    }

    pub fn store(&self, image: &StoreImage) -> ImageSource {
        self.lookup("store", &image.file_stem())
    }

    fn lookup(&self, sub: &str, stem: &str) -> ImageSource {
        match find_with_formats(&self.layout.image_dir(sub), stem, IMAGE_FORMATS) {
            Some(path) => ImageSource::File(path),
            None => ImageSource::Builtin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::GameConfig;
    use std::fs;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn catalog_in(root: &std::path::Path) -> ImageCatalog {
        ImageCatalog::new(&AssetLayout::from_config(
            &GameConfig::new().with_asset_root(root),
        ))
    }

    #[test]
    fn test_button_kind_from_label() {
        assert_eq!(ButtonKind::from_label("Standard"), Some(ButtonKind::Standard));
        assert_eq!(ButtonKind::from_label("Standard Duel"), Some(ButtonKind::Duel));
        assert_eq!(ButtonKind::from_label("Gesture Mode"), Some(ButtonKind::Gesture));
        assert_eq!(ButtonKind::from_label("Controls"), Some(ButtonKind::Controls));
        assert_eq!(ButtonKind::from_label("Settings"), None);
    }

    #[test]
    fn test_button_without_image_is_drawn() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_in(dir.path());
        assert_eq!(
            catalog.button(ButtonKind::Standard, ButtonState::Normal),
            ImageSource::DrawnShape
        );
    }

    #[test]
    fn test_button_normal_png_used() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_in(dir.path());
        let png = catalog.button_dir(ButtonKind::Gesture).join("button_normal.png");
        touch(png.clone());

        assert_eq!(
            catalog.button(ButtonKind::Gesture, ButtonState::Normal),
            ImageSource::File(png.clone())
        );
        // hover falls back to the normal image
        assert_eq!(
            catalog.button(ButtonKind::Gesture, ButtonState::Hover),
            ImageSource::File(png)
        );
        // other kinds are unaffected
        assert_eq!(
            catalog.button(ButtonKind::Duel, ButtonState::Normal),
            ImageSource::DrawnShape
        );
    }

    #[test]
    fn test_button_state_specific_image_wins() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_in(dir.path());
        let normal = catalog.button_dir(ButtonKind::Duel).join("button_normal.png");
        let pressed = catalog.button_dir(ButtonKind::Duel).join("button_pressed.bmp");
        touch(normal);
        touch(pressed.clone());

        assert_eq!(
            catalog.button_for_label("Duel", ButtonState::Pressed),
            ImageSource::File(pressed)
        );
    }

    #[test]
    fn test_unsupported_format_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_in(dir.path());
        touch(catalog.button_dir(ButtonKind::Controls).join("button_normal.tiff"));
        assert_eq!(
            catalog.button(ButtonKind::Controls, ButtonState::Normal),
            ImageSource::DrawnShape
        );
    }

    #[test]
    fn test_logo_and_store_fallback_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_in(dir.path());
        assert_eq!(catalog.logo(LogoImage::Title), ImageSource::Builtin);

        let layout = AssetLayout::from_config(&GameConfig::new().with_asset_root(dir.path()));
        let preview = layout.image_dir("store").join("skin_neon.png");
        touch(preview.clone());
        assert_eq!(
            catalog.store(&StoreImage::SkinPreview("neon".to_string())),
            ImageSource::File(preview)
        );
        assert_eq!(catalog.store(&StoreImage::LineChip), ImageSource::Builtin);
    }
}
