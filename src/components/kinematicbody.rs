//! Kinematic body shared by every simulated object.
//!
//! A [`KinematicBody`] stores position, velocity, box size and the grounded
//! flag. It is embedded in the actor and the enemies rather than attached as
//! a separate component, so the owning record decides when to integrate.
//!
//! Integration is semi-implicit Euler:
//!
//! ```text
//! if !grounded { velocity.y = min(velocity.y + gravity * dt, terminal) }
//! position += velocity * dt
//! ```
//!
//! Position is only ever mutated by [`KinematicBody::integrate`] or by the
//! collision resolver in [`crate::systems::collision`].

use glam::Vec2;

use crate::components::aabb::Aabb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    /// Top-left corner in world units.
    pub pos: Vec2,
    /// Velocity in world units per second. Positive `y` is downwards.
    pub vel: Vec2,
    /// Full box size.
    pub size: Vec2,
    /// Resting on a platform top. Grounded bodies skip gravity.
    pub grounded: bool,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Accelerate downwards unless grounded, clamping to `terminal_velocity`.
    pub fn apply_gravity(&mut self, gravity: f32, terminal_velocity: f32, dt: f32) {
        if self.grounded {
            return;
        }
        self.vel.y = (self.vel.y + gravity * dt).min(terminal_velocity);
    }

    /// Advance position by the current velocity.
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Gravity followed by integration.
    pub fn step(&mut self, gravity: f32, terminal_velocity: f32, dt: f32) {
        self.apply_gravity(gravity, terminal_velocity, dt);
        self.integrate(dt);
    }

    /// Stop all motion.
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn body() -> KinematicBody {
        KinematicBody::new(Vec2::new(0.0, 0.0), Vec2::new(32.0, 48.0))
    }

    #[test]
    fn test_new_is_at_rest_and_airborne() {
        let b = body();
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.grounded);
    }

    #[test]
    fn test_gravity_accelerates_airborne_body() {
        let mut b = body();
        b.apply_gravity(1000.0, 800.0, 0.1);
        assert!(approx_eq(b.vel.y, 100.0));
    }

    #[test]
    fn test_gravity_clamped_to_terminal_velocity() {
        let mut b = body();
        b.vel.y = 790.0;
        b.apply_gravity(1000.0, 800.0, 0.1);
        assert!(approx_eq(b.vel.y, 800.0));
        b.apply_gravity(1000.0, 800.0, 0.1);
        assert!(approx_eq(b.vel.y, 800.0));
    }

    #[test]
    fn test_grounded_body_skips_gravity() {
        let mut b = body();
        b.grounded = true;
        b.apply_gravity(1000.0, 800.0, 0.1);
        assert!(approx_eq(b.vel.y, 0.0));
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut b = body();
        b.vel = Vec2::new(10.0, -20.0);
        b.integrate(0.5);
        assert!(approx_eq(b.pos.x, 5.0));
        assert!(approx_eq(b.pos.y, -10.0));
    }

    #[test]
    fn test_grounded_body_at_rest_does_not_drift() {
        let mut b = body();
        b.pos = Vec2::new(100.0, 452.0);
        b.grounded = true;
        for dt in [0.001, 0.016, 0.033, 0.05] {
            for _ in 0..100 {
                b.step(1800.0, 900.0, dt);
            }
        }
        assert_eq!(b.pos, Vec2::new(100.0, 452.0));
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut b = body();
        b.pos = Vec2::new(10.0, 20.0);
        let aabb = b.bounds();
        assert!(approx_eq(aabb.left(), 10.0));
        assert!(approx_eq(aabb.bottom(), 68.0));
        assert_eq!(b.center(), Vec2::new(26.0, 44.0));
    }
}
