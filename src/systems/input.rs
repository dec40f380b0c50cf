//! Input sampling.
//!
//! [`update_input_state`] polls the binding collaborator once per frame and
//! writes the result into [`InputState`]. It runs outside the step schedule
//! because the source is borrowed from the caller for the frame only.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputSource, InputState};

/// Poll `source` for every action and update the `InputState` resource.
///
/// Inserts a default `InputState` first if the world has none.
pub fn update_input_state(world: &mut World, source: &dyn InputSource) {
    if !world.contains_resource::<InputState>() {
        world.insert_resource(InputState::default());
    }
    world.resource_mut::<InputState>().sample(source);
}
