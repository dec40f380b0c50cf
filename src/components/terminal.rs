use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::aabb::Aabb;

/// Interactive object that can only be activated during a hack window.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Terminal {
    pub bounds: Aabb,
    pub hacked: bool,
}

impl Terminal {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            hacked: false,
        }
    }

    /// Within `radius` of `point`, measured to the closest edge.
    pub fn in_reach(&self, point: Vec2, radius: f32) -> bool {
        self.bounds.intersects_circle(point, radius)
    }
}
