use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::aabb::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    /// Restores health, clamped to the actor's max.
    Heart(i32),
    /// Score value reported to the presentation layer.
    Coin(u32),
}

/// Collectable item. Collected pickups are swept by the cleanup pass.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Pickup {
    pub bounds: Aabb,
    pub kind: PickupKind,
    pub collected: bool,
}

impl Pickup {
    pub fn new(bounds: Aabb, kind: PickupKind) -> Self {
        Self {
            bounds,
            kind,
            collected: false,
        }
    }
}
