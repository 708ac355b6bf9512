//! Gesture to action table.

use crate::events::input::{GameAction, Gesture};
use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Maps recognized gestures to piece actions.
///
/// Defaults: thumb rotates, index finger moves left, middle finger moves
/// right, ring finger moves down, closed fist hard drops.
#[derive(Resource, Debug, Clone)]
pub struct GestureBindings {
    map: FxHashMap<Gesture, GameAction>,
}

impl Default for GestureBindings {
    fn default() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Gesture::Thumb, GameAction::Rotate);
        map.insert(Gesture::IndexFinger, GameAction::MoveLeft);
        map.insert(Gesture::MiddleFinger, GameAction::MoveRight);
        map.insert(Gesture::RingFinger, GameAction::MoveDown);
        map.insert(Gesture::ClosedFist, GameAction::HardDrop);
        Self { map }
    }
}

impl GestureBindings {
    pub fn action_for(&self, gesture: Gesture) -> Option<GameAction> {
        self.map.get(&gesture).copied()
    }

    /// Rows of the table in [`Gesture::ALL`] order, for help screens.
    pub fn table(&self) -> Vec<(Gesture, GameAction)> {
        Gesture::ALL
            .into_iter()
            .filter_map(|g| self.action_for(g).map(|a| (g, a)))
            .collect()
    }
}
