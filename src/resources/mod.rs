//! ECS resources made available to systems.
//!
//! Overview
//! - `assetlayout` – asset folder taxonomy, accepted formats and directory scanning
//! - `audio` – bridge and channels for the background audio thread
//! - `gameconfig` – INI settings: asset roots, volumes, sound pack, camera flags
//! - `gestures` – fixed gesture to action table
//! - `imagecatalog` – button, logo and store images with drawn/built-in fallbacks
//! - `musiclibrary` – track lists per music category and random selection
//! - `musicplayer` – music playback state and the shared audio RNG
//! - `soundbank` – sound effect pools and the active custom sound pack
//! - `store` – LineChips balance and block skins persisted as JSON
pub mod assetlayout;
pub mod audio;
pub mod gameconfig;
pub mod gestures;
pub mod imagecatalog;
pub mod musiclibrary;
pub mod musicplayer;
pub mod soundbank;
pub mod store;
