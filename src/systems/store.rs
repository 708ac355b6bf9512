//! LineChips rewards.

use crate::events::gameplay::GameplayEvent;
use crate::resources::store::Store;
use bevy_ecs::prelude::*;
use log::{info, warn};

/// Credit one LineChip per cleared line and persist the new balance.
pub fn award_line_chips(mut events: MessageReader<GameplayEvent>, mut store: ResMut<Store>) {
    let lines: u64 = events
        .read()
        .map(|event| match event {
            GameplayEvent::LinesCleared { lines } => u64::from(*lines),
            _ => 0,
        })
        .sum();
    if lines == 0 {
        return;
    }
    match store.add_line_chips(lines) {
        Ok(balance) => info!("Earned {} LineChips, balance {}", lines, balance),
        Err(e) => warn!("Could not save LineChips award: {}", e),
    }
}
