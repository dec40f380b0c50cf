//! Per-frame action input resource.
//!
//! The simulation never reads hardware. Once per frame the orchestrator polls
//! an [`InputSource`] (the key-binding collaborator) for each [`Action`] and
//! writes the result into [`InputState`], which derives pressed/released
//! edges from the previous frame.
use bevy_ecs::prelude::*;

/// Gameplay actions the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    Attack,
    Ability,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Dash,
        Action::Attack,
        Action::Ability,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Opaque lookup of which actions are currently held.
///
/// Implemented by whatever owns the key bindings; polled once per frame.
pub trait InputSource {
    fn is_down(&self, action: Action) -> bool;
}

/// Small bitset of held actions, handy for scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldActions {
    bits: u8,
}

impl HeldActions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.bits |= action.bit();
        self
    }

    pub fn set(&mut self, action: Action, down: bool) {
        if down {
            self.bits |= action.bit();
        } else {
            self.bits &= !action.bit();
        }
    }
}

impl InputSource for HeldActions {
    fn is_down(&self, action: Action) -> bool {
        self.bits & action.bit() != 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edge detection.
pub struct BoolState {
    /// Whether the action is held this frame.
    pub active: bool,
    /// Whether the action was pressed this frame.
    pub just_pressed: bool,
    /// Whether the action was released this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the held state for this frame and recompute the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame action state relevant to gameplay.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub dash: BoolState,
    pub attack: BoolState,
    pub ability: BoolState,
}

impl InputState {
    /// Poll `source` for every action and update edges.
    pub fn sample(&mut self, source: &(impl InputSource + ?Sized)) {
        for action in Action::ALL {
            let down = source.is_down(action);
            self.button_mut(action).update(down);
        }
    }

    pub fn button(&self, action: Action) -> &BoolState {
        match action {
            Action::MoveLeft => &self.move_left,
            Action::MoveRight => &self.move_right,
            Action::Jump => &self.jump,
            Action::Dash => &self.dash,
            Action::Attack => &self.attack,
            Action::Ability => &self.ability,
        }
    }

    fn button_mut(&mut self, action: Action) -> &mut BoolState {
        match action {
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::Jump => &mut self.jump,
            Action::Dash => &mut self.dash,
            Action::Attack => &mut self.attack,
            Action::Ability => &mut self.ability,
        }
    }

    /// Horizontal intent: -1, 0 or 1. Opposing directions cancel out.
    pub fn horizontal(&self) -> f32 {
        let mut dir = 0.0;
        if self.move_left.active {
            dir -= 1.0;
        }
        if self.move_right.active {
            dir += 1.0;
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_actions_bits() {
        let held = HeldActions::none().with(Action::Jump).with(Action::MoveLeft);
        assert!(held.is_down(Action::Jump));
        assert!(held.is_down(Action::MoveLeft));
        assert!(!held.is_down(Action::MoveRight));

        let mut held = held;
        held.set(Action::Jump, false);
        assert!(!held.is_down(Action::Jump));
    }

    #[test]
    fn test_edges_from_consecutive_samples() {
        let mut input = InputState::default();
        let jump = HeldActions::none().with(Action::Jump);

        input.sample(&jump);
        assert!(input.jump.active);
        assert!(input.jump.just_pressed);

        input.sample(&jump);
        assert!(input.jump.active);
        assert!(!input.jump.just_pressed);

        input.sample(&HeldActions::none());
        assert!(!input.jump.active);
        assert!(input.jump.just_released);

        input.sample(&HeldActions::none());
        assert!(!input.jump.just_released);
    }

    #[test]
    fn test_horizontal_cancels_out() {
        let mut input = InputState::default();
        input.sample(&HeldActions::none().with(Action::MoveLeft));
        assert_eq!(input.horizontal(), -1.0);
        input.sample(
            &HeldActions::none()
                .with(Action::MoveLeft)
                .with(Action::MoveRight),
        );
        assert_eq!(input.horizontal(), 0.0);
        input.sample(&HeldActions::none().with(Action::MoveRight));
        assert_eq!(input.horizontal(), 1.0);
    }

    #[test]
    fn test_button_lookup() {
        let mut input = InputState::default();
        input.sample(&HeldActions::none().with(Action::Dash));
        assert!(input.button(Action::Dash).just_pressed);
        assert!(!input.button(Action::Attack).active);
    }
}
