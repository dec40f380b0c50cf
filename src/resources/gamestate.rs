//! Level lifecycle state.
//!
//! [`GameState`] says whether a level is running; [`NextGameState`] holds a
//! transition requested mid-step (loading a level, reaching the goal). The
//! request is applied by `observe_gamestate_change_event` once the step
//! schedule has finished, so gameplay systems never flip the run condition
//! under each other.

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    /// Nothing loaded yet.
    #[default]
    None,
    Playing,
    /// Goal reached. Gameplay systems stay idle until the next level load.
    LevelComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &GameStates {
        &self.current
    }

    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }

    /// Overwrite the state without going through the observer. Tests and
    /// the observer itself use this; gameplay code requests via [`NextGameState`].
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.next, NextGameStates::Pending(_))
    }

    /// Queue `next`. A later request in the same step replaces an earlier one.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    /// Hand out the queued state, leaving nothing pending.
    pub fn take(&mut self) -> Option<GameStates> {
        match std::mem::take(&mut self.next) {
            NextGameStates::Pending(state) => Some(state),
            NextGameStates::Unchanged => None,
        }
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_request() {
        let mut next = NextGameState::new();
        assert!(!next.is_pending());
        assert_eq!(next.take(), None);

        next.set(GameStates::Playing);
        next.set(GameStates::LevelComplete);
        assert!(next.is_pending());
        assert_eq!(next.take(), Some(GameStates::LevelComplete));
        assert_eq!(next.get(), &NextGameStates::Unchanged);
        assert_eq!(next.take(), None);
    }

    #[test]
    fn test_reset_drops_request() {
        let mut next = NextGameState::new();
        next.set(GameStates::Playing);
        next.reset();
        assert!(!next.is_pending());
    }

    #[test]
    fn test_game_state_starts_empty() {
        let mut state = GameState::new();
        assert_eq!(state.get(), &GameStates::None);
        assert!(!state.is_playing());
        state.set(GameStates::Playing);
        assert!(state.is_playing());
    }
}
