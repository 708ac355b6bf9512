//! Gameplay notifications.
//!
//! The board simulation writes a [`GameplayEvent`] whenever something
//! audible or rewarding happens. Sound effects and the LineChips award
//! both subscribe to these messages, so the board never talks to the audio
//! thread or the store directly.

use crate::resources::soundbank::SoundEffect;
use bevy_ecs::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayEvent {
    /// The falling piece merged into the board.
    BlockLanded,
    /// One or more rows were completed by the last lock.
    LinesCleared { lines: u32 },
    LevelUp,
    GameOver,
}

impl GameplayEvent {
    /// The effect this event sounds like, if any.
    pub fn sound_effect(self) -> Option<SoundEffect> {
        match self {
            GameplayEvent::BlockLanded => Some(SoundEffect::BlockLand),
            GameplayEvent::LinesCleared { lines: 0 } => None,
            GameplayEvent::LinesCleared { .. } => Some(SoundEffect::LineClear),
            GameplayEvent::LevelUp => Some(SoundEffect::LevelUp),
            GameplayEvent::GameOver => Some(SoundEffect::GameOver),
        }
    }
}

/// Play one effect outside of gameplay, e.g. a settings preview.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundRequest(pub SoundEffect);
