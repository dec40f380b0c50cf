//! Range-limited projectiles.
//!
//! Projectiles travel in a straight line at constant speed and die when they
//! exceed their range or on their first hit. Enemy bullets and flames hurt
//! the actor; the actor's kinetic wave pushes every enemy inside its radius
//! on the frame it first overlaps any of them.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::aabb::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    /// Aimed enemy shot.
    Bullet,
    /// Flame emitter shot along a cardinal direction.
    Flame,
    /// The striker's push-back wave.
    KineticWave,
}

impl ProjectileKind {
    /// Whether this projectile is hostile to the actor.
    pub fn hurts_actor(self) -> bool {
        !matches!(self, ProjectileKind::KineticWave)
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Center position.
    pub pos: Vec2,
    /// Unit vector, or zero for a degenerate launch.
    pub dir: Vec2,
    pub speed: f32,
    pub traveled: f32,
    pub max_range: f32,
    /// Collision radius around `pos`.
    pub radius: f32,
    pub damage: i32,
    pub alive: bool,
}

impl Projectile {
    /// Launch from `pos` towards `dir`. A zero-length direction yields a
    /// projectile that never moves.
    pub fn new(
        kind: ProjectileKind,
        pos: Vec2,
        dir: Vec2,
        speed: f32,
        max_range: f32,
        radius: f32,
        damage: i32,
    ) -> Self {
        Self {
            kind,
            pos,
            dir: dir.normalize_or_zero(),
            speed,
            traveled: 0.0,
            max_range,
            radius,
            damage,
            alive: true,
        }
    }

    /// Advance along `dir`. Dies once `traveled` exceeds `max_range`.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        let step = self.speed * dt;
        self.pos += self.dir * step;
        self.traveled += step.abs();
        if self.traveled > self.max_range || self.dir == Vec2::ZERO {
            self.alive = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }

    pub fn hits(&self, target: &Aabb) -> bool {
        self.alive && target.intersects_circle(self.pos, self.radius)
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}
