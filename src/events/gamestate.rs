//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. The end-of-frame `check_pending_state` system then
//! triggers a [`GameStateChangedEvent`], and the observer in this module
//! applies the transition to [`GameState`].
//!
//! This decouples the intent to change state from applying it and avoids
//! borrowing conflicts inside the step schedule.
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Reads [`NextGameState`]; if a transition is pending, copies it into
/// [`GameState`] and clears the request. Missing resources are logged and
/// ignored.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    next_game_state: Option<ResMut<NextGameState>>,
    game_state: Option<ResMut<GameState>>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(mut next_game_state), Some(mut game_state)) = (next_game_state, game_state) else {
        warn!("NextGameState or GameState missing in observe_gamestate_change_event");
        return;
    };

    match next_game_state.take() {
        Some(new_state) => {
            info!("Transitioning from {:?} to {:?}", game_state.get(), new_state);
            game_state.set(new_state);
            on_state_enter(new_state);
        }
        None => debug!("No state change pending."),
    }
}

fn on_state_enter(state: GameStates) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Playing => debug!("Entered Playing state"),
        GameStates::LevelComplete => info!("Level complete"),
    }
}
