//! Axis-aligned bounding boxes.
//!
//! Every simulated body exposes its extents as an [`Aabb`]. Boxes are
//! anchored at their top-left corner with `y` growing downwards, matching the
//! screen-space convention used by the level data.

use glam::Vec2;

/// World-space axis-aligned box: top-left corner plus full size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    /// Create a box from its top-left corner and size.
    ///
    /// Negative sizes are normalized so that `pos` is always the minimum corner.
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        let p1 = pos + size;
        let min = pos.min(p1);
        let max = pos.max(p1);
        Self {
            pos: min,
            size: max - min,
        }
    }

    /// Create a box centered on `center` with the given half extents.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, half_extents * 2.0)
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Strict AABB vs AABB overlap. Touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Closest point of the box to `point`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.pos, self.pos + self.size)
    }

    /// Circle vs AABB overlap.
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = self.closest_point(center);
        closest.distance_squared(center) < radius * radius
    }
}
