use bevy_ecs::prelude::Component;

use crate::components::aabb::Aabb;

/// End of the level. Overlapping it requests the level-complete state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Goal {
    pub bounds: Aabb,
}
