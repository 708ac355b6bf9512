//! ECS systems.
//!
//! Submodules overview
//! - [`audio`] – the audio thread and the systems bridging it with the world
//! - [`gestures`] – translate gesture messages into game actions
//! - [`music`] – apply music requests to the player and track load failures
//! - [`soundfx`] – play sound effects for gameplay events
//! - [`store`] – award LineChips for cleared lines

pub mod audio;
pub mod gestures;
pub mod music;
pub mod soundfx;
pub mod store;
