//! LineChips balance and block skins.
//!
//! The store is a JSON document on disk. Players earn one LineChip per
//! cleared line and spend them on skins that recolor the seven tetrominoes.
//! Every mutation is written back immediately.
//!
//! # File Format
//!
//! ```json
//! {
//!   "line_chips": 12,
//!   "owned_skins": ["default", "neon"],
//!   "active_skin": "neon",
//!   "available_skins": {
//!     "neon": {
//!       "name": "Neon", "type": "basic", "price": 15,
//!       "description": "Bright, glowing blocks", "owned": true,
//!       "colors": [[0,255,255], [80,80,255], [255,180,0], [255,255,0], [0,255,80], [255,0,255], [255,0,80]]
//!     }
//!   }
//! }
//! ```
//!
//! Invariants kept by [`StoreData::normalize`]:
//! - the `default` skin always exists and is owned
//! - a skin is listed in `owned_skins` exactly when its `owned` flag is set
//! - `active_skin` names an owned skin

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_SKIN: &str = "default";

pub type Rgb = [u8; 3];

/// The seven tetrominoes, in the order skins list their colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkinTier {
    Basic,
    Special,
}

/// Animated rendering effect of special skins.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkinEffect {
    Gradient,
    Sparkle,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Skin {
    pub name: String,
    #[serde(rename = "type")]
    pub tier: SkinTier,
    pub price: u64,
    pub description: String,
    pub owned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<SkinEffect>,
    /// One color per [`PieceKind`].
    pub colors: [Rgb; 7],
}

impl Skin {
    pub fn color(&self, piece: PieceKind) -> Rgb {
        self.colors[piece.index()]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoreData {
    pub line_chips: u64,
    pub owned_skins: Vec<String>,
    pub active_skin: String,
    pub available_skins: BTreeMap<String, Skin>,
}

fn skin(
    name: &str,
    tier: SkinTier,
    price: u64,
    description: &str,
    effect: Option<SkinEffect>,
    colors: [Rgb; 7],
) -> Skin {
    Skin {
        name: name.to_string(),
        tier,
        price,
        description: description.to_string(),
        owned: false,
        effect,
        colors,
    }
}

fn default_skin() -> Skin {
    Skin {
        owned: true,
        ..skin(
            "Default",
            SkinTier::Basic,
            0,
            "The classic Tetris blocks",
            None,
            [
                [0, 255, 255],
                [0, 0, 255],
                [255, 165, 0],
                [255, 255, 0],
                [0, 255, 0],
                [128, 0, 128],
                [255, 0, 0],
            ],
        )
    }
}

/// The skin catalog shipped with the game.
pub fn default_catalog() -> BTreeMap<String, Skin> {
    use SkinEffect::{Gradient, Sparkle};
    use SkinTier::{Basic, Special};

    let mut skins = BTreeMap::new();
    skins.insert(DEFAULT_SKIN.to_string(), default_skin());
    skins.insert(
        "glossy".to_string(),
        skin(
            "Glossy",
            Basic,
            15,
            "Shiny, reflective blocks",
            None,
            [
                [100, 255, 255],
                [100, 100, 255],
                [255, 200, 100],
                [255, 255, 100],
                [100, 255, 100],
                [200, 100, 200],
                [255, 100, 100],
            ],
        ),
    );
    skins.insert(
        "matte".to_string(),
        skin(
            "Matte",
            Basic,
            15,
            "Smooth, non-reflective blocks",
            None,
            [
                [0, 200, 200],
                [0, 0, 200],
                [200, 120, 0],
                [200, 200, 0],
                [0, 200, 0],
                [100, 0, 100],
                [200, 0, 0],
            ],
        ),
    );
    skins.insert(
        "neon".to_string(),
        skin(
            "Neon",
            Basic,
            15,
            "Bright, glowing blocks",
            None,
            [
                [0, 255, 255],
                [80, 80, 255],
                [255, 180, 0],
                [255, 255, 0],
                [0, 255, 80],
                [255, 0, 255],
                [255, 0, 80],
            ],
        ),
    );
    skins.insert(
        "retro".to_string(),
        skin(
            "Retro",
            Basic,
            15,
            "Old-school pixelated blocks",
            None,
            [
                [0, 170, 170],
                [0, 0, 170],
                [170, 85, 0],
                [170, 170, 0],
                [0, 170, 0],
                [170, 0, 170],
                [170, 0, 0],
            ],
        ),
    );
    skins.insert(
        "gradient".to_string(),
        skin(
            "Gradient",
            Special,
            30,
            "Blocks with smooth gradient effect",
            Some(Gradient),
            [
                [0, 255, 255],
                [0, 0, 255],
                [255, 165, 0],
                [255, 255, 0],
                [0, 255, 0],
                [128, 0, 128],
                [255, 0, 0],
            ],
        ),
    );
    skins.insert(
        "sparkle".to_string(),
        skin(
            "Sparkle",
            Special,
            30,
            "Blocks with sparkling effect",
            Some(Sparkle),
            [
                [0, 200, 200],
                [0, 0, 200],
                [200, 130, 0],
                [200, 200, 0],
                [0, 200, 0],
                [100, 0, 100],
                [200, 0, 0],
            ],
        ),
    );
    skins.insert(
        "pastel".to_string(),
        skin(
            "Pastel",
            Special,
            30,
            "Soft pastel colored blocks",
            Some(Gradient),
            [
                [173, 216, 230],
                [173, 216, 255],
                [255, 218, 185],
                [255, 255, 224],
                [144, 238, 144],
                [221, 160, 221],
                [255, 182, 193],
            ],
        ),
    );
    skins.insert(
        "metallic".to_string(),
        skin(
            "Metallic",
            Special,
            30,
            "Shiny metallic blocks",
            Some(Gradient),
            [
                [176, 196, 222],
                [70, 130, 180],
                [184, 134, 11],
                [218, 165, 32],
                [46, 139, 87],
                [139, 0, 139],
                [178, 34, 34],
            ],
        ),
    );
    skins
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            line_chips: 0,
            owned_skins: vec![DEFAULT_SKIN.to_string()],
            active_skin: DEFAULT_SKIN.to_string(),
            available_skins: default_catalog(),
        }
    }
}

impl StoreData {
    /// Restore the invariants listed in the module docs.
    pub fn normalize(&mut self) {
        self.available_skins
            .entry(DEFAULT_SKIN.to_string())
            .or_insert_with(default_skin)
            .owned = true;

        for id in &self.owned_skins {
            if let Some(skin) = self.available_skins.get_mut(id) {
                skin.owned = true;
            }
        }

        let mut owned: Vec<String> = Vec::new();
        for id in &self.owned_skins {
            if self.available_skins.contains_key(id) && !owned.contains(id) {
                owned.push(id.clone());
            }
        }
        for (id, skin) in &self.available_skins {
            if skin.owned && !owned.contains(id) {
                owned.push(id.clone());
            }
        }
        self.owned_skins = owned;

        let active_ok = self
            .available_skins
            .get(&self.active_skin)
            .map(|skin| skin.owned)
            .unwrap_or(false);
        if !active_ok {
            warn!(
                "Active skin '{}' is not owned, falling back to '{}'",
                self.active_skin, DEFAULT_SKIN
            );
            self.active_skin = DEFAULT_SKIN.to_string();
        }
    }
}

/// Reasons a store operation can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    UnknownSkin(String),
    AlreadyOwned(String),
    NotEnoughChips { need: u64, have: u64 },
    NotOwned(String),
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownSkin(id) => write!(f, "Skin not found: {}", id),
            StoreError::AlreadyOwned(id) => write!(f, "Already owned: {}", id),
            StoreError::NotEnoughChips { need, have } => {
                write!(f, "Not enough LineChips. Need {}, have {}", need, have)
            }
            StoreError::NotOwned(id) => write!(f, "You don't own this skin: {}", id),
            StoreError::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Store resource: the document plus where it lives.
#[derive(Resource, Debug, Clone)]
pub struct Store {
    path: PathBuf,
    data: StoreData,
}

impl Store {
    /// Open the store at `path`.
    ///
    /// A missing file is created with the default catalog. A file that cannot
    /// be read or parsed is left untouched and defaults are used in memory.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = if path.exists() {
            match Self::read(&path) {
                Ok(mut data) => {
                    data.normalize();
                    data
                }
                Err(e) => {
                    warn!("Store file {:?} unusable, using defaults: {}", path, e);
                    StoreData::default()
                }
            }
        } else {
            let store = Self {
                path: path.clone(),
                data: StoreData::default(),
            };
            if let Err(e) = store.save() {
                warn!("Could not create store file: {}", e);
            }
            return store;
        };
        Self { path, data }
    }

    fn read(path: &Path) -> Result<StoreData, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Write the document to disk, creating parent folders.
    pub fn save(&self) -> Result<(), StoreError> {
        Self::write(&self.path, &self.data)
    }

    fn write(path: &Path, data: &StoreData) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("Failed to create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| StoreError::Io(format!("Failed to encode store: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {e}", path.display())))
    }

    /// Persist `next` and adopt it. On error the in-memory document is unchanged.
    fn commit(&mut self, next: StoreData) -> Result<(), StoreError> {
        Self::write(&self.path, &next)?;
        self.data = next;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    pub fn line_chips(&self) -> u64 {
        self.data.line_chips
    }

    pub fn active_skin_id(&self) -> &str {
        &self.data.active_skin
    }

    pub fn skin(&self, id: &str) -> Option<&Skin> {
        self.data.available_skins.get(id)
    }

    /// Skins ordered for display: basic before special, then by price and id.
    pub fn skins(&self) -> Vec<(&str, &Skin)> {
        let mut skins: Vec<(&str, &Skin)> = self
            .data
            .available_skins
            .iter()
            .map(|(id, skin)| (id.as_str(), skin))
            .collect();
        skins.sort_by_key(|(id, skin)| (skin.tier == SkinTier::Special, skin.price, *id));
        skins
    }

    /// The active skin, `default` if the document lost it.
    pub fn active_skin(&self) -> Skin {
        self.skin(&self.data.active_skin)
            .cloned()
            .unwrap_or_else(default_skin)
    }

    pub fn active_color(&self, piece: PieceKind) -> Rgb {
        self.active_skin().color(piece)
    }

    /// Colors of the active skin, indexed by [`PieceKind::index`].
    pub fn active_colors(&self) -> [Rgb; 7] {
        self.active_skin().colors
    }

    /// Credit LineChips and persist; returns the new balance.
    pub fn add_line_chips(&mut self, amount: u64) -> Result<u64, StoreError> {
        let mut next = self.data.clone();
        next.line_chips = next.line_chips.saturating_add(amount);
        self.commit(next)?;
        Ok(self.data.line_chips)
    }

    /// Buy a skin with LineChips.
    pub fn purchase_skin(&mut self, id: &str) -> Result<&Skin, StoreError> {
        let skin = self
            .skin(id)
            .ok_or_else(|| StoreError::UnknownSkin(id.to_string()))?;
        if skin.owned {
            return Err(StoreError::AlreadyOwned(id.to_string()));
        }
        let have = self.data.line_chips;
        if have < skin.price {
            return Err(StoreError::NotEnoughChips {
                need: skin.price,
                have,
            });
        }

        let mut next = self.data.clone();
        next.line_chips = have - skin.price;
        next.owned_skins.push(id.to_string());
        if let Some(skin) = next.available_skins.get_mut(id) {
            skin.owned = true;
        }
        self.commit(next)?;
        info!("Purchased skin '{}' ({} LineChips left)", id, self.data.line_chips);
        Ok(&self.data.available_skins[id])
    }

    /// Make an owned skin the active one.
    pub fn set_active_skin(&mut self, id: &str) -> Result<&Skin, StoreError> {
        let skin = self
            .skin(id)
            .ok_or_else(|| StoreError::UnknownSkin(id.to_string()))?;
        if !skin.owned {
            return Err(StoreError::NotOwned(id.to_string()));
        }
        let mut next = self.data.clone();
        next.active_skin = id.to_string();
        self.commit(next)?;
        info!("Active skin set to '{}'", id);
        Ok(&self.data.available_skins[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> Store {
        Store::open(dir.path().join("store.json"))
    }

    #[test]
    fn test_default_catalog() {
        let data = StoreData::default();
        assert_eq!(data.available_skins.len(), 9);
        assert_eq!(data.line_chips, 0);
        assert_eq!(data.owned_skins, vec!["default".to_string()]);
        let owned: Vec<_> = data
            .available_skins
            .iter()
            .filter(|(_, s)| s.owned)
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(owned, vec!["default"]);
        assert_eq!(data.available_skins["neon"].price, 15);
        assert_eq!(data.available_skins["sparkle"].effect, Some(SkinEffect::Sparkle));
    }

    #[test]
    fn test_open_missing_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.path().exists());
        assert_eq!(store.line_chips(), 0);
        assert_eq!(store.active_skin_id(), DEFAULT_SKIN);
    }

    #[test]
    fn test_corrupt_file_uses_defaults_and_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = Store::open(&path);
        assert_eq!(store.data(), &StoreData::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_purchase_needs_enough_chips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.add_line_chips(10).unwrap();

        assert_eq!(
            store.purchase_skin("neon").unwrap_err(),
            StoreError::NotEnoughChips { need: 15, have: 10 }
        );
        assert_eq!(store.line_chips(), 10);

        store.add_line_chips(5).unwrap();
        let skin = store.purchase_skin("neon").unwrap();
        assert_eq!(skin.name, "Neon");
        assert_eq!(store.line_chips(), 0);
        assert!(store.data().owned_skins.contains(&"neon".to_string()));
    }

    #[test]
    fn test_purchase_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert_eq!(
            store.purchase_skin("gold").unwrap_err(),
            StoreError::UnknownSkin("gold".to_string())
        );
        assert_eq!(
            store.purchase_skin("default").unwrap_err(),
            StoreError::AlreadyOwned("default".to_string())
        );
    }

    #[test]
    fn test_set_active_requires_ownership() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert_eq!(
            store.set_active_skin("metallic").unwrap_err(),
            StoreError::NotOwned("metallic".to_string())
        );

        store.add_line_chips(30).unwrap();
        store.purchase_skin("metallic").unwrap();
        store.set_active_skin("metallic").unwrap();
        assert_eq!(store.active_skin().name, "Metallic");
        assert_eq!(store.active_color(PieceKind::I), [176, 196, 222]);
    }

    #[test]
    fn test_changes_persist_across_open() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = store_in(&dir);
            store.add_line_chips(20).unwrap();
            store.purchase_skin("retro").unwrap();
            store.set_active_skin("retro").unwrap();
        }
        let store = store_in(&dir);
        assert_eq!(store.line_chips(), 5);
        assert_eq!(store.active_skin_id(), "retro");
        assert!(store.skin("retro").unwrap().owned);
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.add_line_chips(20).unwrap();

        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a folder").unwrap();
        store.path = blocker.join("store.json");

        assert!(matches!(store.add_line_chips(5), Err(StoreError::Io(_))));
        assert_eq!(store.line_chips(), 20);

        assert!(matches!(store.purchase_skin("neon"), Err(StoreError::Io(_))));
        assert_eq!(store.line_chips(), 20);
        assert!(!store.skin("neon").unwrap().owned);
        assert!(!store.data().owned_skins.contains(&"neon".to_string()));

        assert!(matches!(store.set_active_skin("default"), Err(StoreError::Io(_))));
        assert_eq!(store.active_skin_id(), "default");

        // the last good state is what is on disk
        assert_eq!(store_in(&dir).line_chips(), 20);
    }

    #[test]
    fn test_normalize_repairs_inconsistent_document() {
        let mut data = StoreData::default();
        data.available_skins.get_mut("gradient").unwrap().owned = true;
        data.owned_skins.push("sparkle".to_string());
        data.owned_skins.push("ghost".to_string());
        data.active_skin = "pastel".to_string();
        data.available_skins.remove(DEFAULT_SKIN);

        data.normalize();

        assert!(data.available_skins[DEFAULT_SKIN].owned);
        assert!(data.available_skins["sparkle"].owned);
        assert!(data.owned_skins.contains(&"gradient".to_string()));
        assert!(!data.owned_skins.contains(&"ghost".to_string()));
        assert!(data.owned_skins.contains(&DEFAULT_SKIN.to_string()));
        assert_eq!(data.active_skin, DEFAULT_SKIN);
    }

    #[test]
    fn test_skins_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let ids: Vec<_> = store.skins().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids[0], "default");
        assert_eq!(ids[1], "glossy");
        assert_eq!(ids[5], "gradient");
        assert_eq!(ids.len(), 9);
    }
}
