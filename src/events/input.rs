//! Gesture input and game action messages.
//!
//! The webcam front end classifies a hand pose into a [`Gesture`] and writes
//! a [`GestureEvent`]. The
//! [`translate_gestures`](crate::systems::gestures::translate_gestures)
//! system maps it through
//! [`GestureBindings`](crate::resources::gestures::GestureBindings) and
//! writes the resulting [`GameActionEvent`] for the board to consume.

use bevy_ecs::prelude::*;
use std::fmt;

/// Hand poses the front end can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Thumb,
    IndexFinger,
    MiddleFinger,
    RingFinger,
    ClosedFist,
}

impl Gesture {
    pub const ALL: [Gesture; 5] = [
        Gesture::Thumb,
        Gesture::IndexFinger,
        Gesture::MiddleFinger,
        Gesture::RingFinger,
        Gesture::ClosedFist,
    ];
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gesture::Thumb => "thumb",
            Gesture::IndexFinger => "index finger",
            Gesture::MiddleFinger => "middle finger",
            Gesture::RingFinger => "ring finger",
            Gesture::ClosedFist => "closed fist",
        };
        f.write_str(name)
    }
}

/// Logical piece actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Rotate,
    MoveLeft,
    MoveRight,
    MoveDown,
    HardDrop,
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameAction::Rotate => "rotate",
            GameAction::MoveLeft => "move left",
            GameAction::MoveRight => "move right",
            GameAction::MoveDown => "move down",
            GameAction::HardDrop => "hard drop",
        };
        f.write_str(name)
    }
}

/// Board a message is aimed at; gesture play is single-player, dual mode
/// has two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub player: PlayerSlot,
    pub gesture: Gesture,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameActionEvent {
    pub player: PlayerSlot,
    pub action: GameAction,
}
