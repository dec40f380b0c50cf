//! Static level geometry.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::aabb::Aabb;

/// Visual tag only; every kind collides the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    #[default]
    Ground,
    Brick,
    Metal,
    Floating,
}

/// Immutable obstacle. Never the moving side of a collision.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    bounds: Aabb,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2, kind: PlatformKind) -> Self {
        Self {
            bounds: Aabb::new(pos, size),
            kind,
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}
