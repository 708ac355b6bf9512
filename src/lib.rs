//! GeTrix asset, audio and store library.
//!
//! Resolves user-replaceable music, sound and image assets, drives playback
//! through a background audio thread, keeps the LineChips skin store on disk
//! and maps recognized gestures to piece actions. Everything is exposed as
//! `bevy_ecs` resources, messages and systems so a game front end can drop
//! them into its own schedule, or use [`game::build_world`] and
//! [`game::build_schedule`] as they are.

pub mod events;
pub mod game;
pub mod layout_generator;
pub mod report;
pub mod resources;
pub mod systems;
