//! Messages exchanged between systems.
//!
//! Submodules:
//! - [`audio`] – commands and replies for the background audio thread
//! - [`gameplay`] – board notifications that trigger sounds and rewards
//! - [`input`] – recognized gestures and the game actions they map to
//! - [`music`] – music mode and volume requests from screens and settings
pub mod audio;
pub mod gameplay;
pub mod input;
pub mod music;
