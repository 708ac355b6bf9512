//! Gesture to action translation.

use crate::events::input::{GameActionEvent, GestureEvent};
use crate::resources::gestures::GestureBindings;
use bevy_ecs::prelude::*;
use log::trace;

/// Map every [`GestureEvent`] through [`GestureBindings`], keeping the player slot.
pub fn translate_gestures(
    mut gestures: MessageReader<GestureEvent>,
    bindings: Res<GestureBindings>,
    mut actions: MessageWriter<GameActionEvent>,
) {
    for event in gestures.read() {
        let Some(action) = bindings.action_for(event.gesture) else {
            continue;
        };
        trace!("{:?}: {} -> {}", event.player, event.gesture, action);
        actions.write(GameActionEvent {
            player: event.player,
            action,
        });
    }
}
