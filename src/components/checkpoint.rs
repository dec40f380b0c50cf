use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::aabb::Aabb;

/// Respawn marker. Activates once, on first overlap with the actor.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub bounds: Aabb,
    pub active: bool,
}

impl Checkpoint {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            active: false,
        }
    }

    /// Where the actor respawns: bottom-aligned with the checkpoint, same left edge.
    pub fn spawn_point(&self, actor_size: Vec2) -> Vec2 {
        Vec2::new(self.bounds.left(), self.bounds.bottom() - actor_size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_point_bottom_aligned() {
        let cp = Checkpoint::new(Aabb::new(Vec2::new(300.0, 436.0), Vec2::new(32.0, 64.0)));
        assert!(!cp.active);
        assert_eq!(cp.spawn_point(Vec2::new(32.0, 48.0)), Vec2::new(300.0, 452.0));
    }
}
