use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, NextGameState};
use bevy_ecs::prelude::*;

/// Trigger the state observer if a transition was requested this frame.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if next_state.is_pending() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Run condition for the simulation systems.
pub fn state_is_playing(state: Res<GameState>) -> bool {
    state.is_playing()
}
