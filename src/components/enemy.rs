//! Hazards and enemies.
//!
//! Every enemy shares one [`Enemy`] record (body, HP, stats, stun and
//! knockback) and a [`Behavior`] tag that selects how [`Enemy::update`]
//! moves it. The variants form a closed set and are dispatched with a single
//! `match`.
//!
//! | Behavior       | Moves                          | Stompable |
//! |----------------|--------------------------------|-----------|
//! | `Patrol`       | horizontal, between two x      | yes       |
//! | `Flying`       | horizontal or vertical bounce  | yes       |
//! | `Stationary`   | never                          | no        |
//! | `FlameEmitter` | never, shoots while active     | no        |
//! | `Rotating`     | arm around a pivot             | no        |
//!
//! Killing an enemy only clears `alive`; the entity is removed later by the
//! cleanup pass.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::aabb::Aabb;
use crate::components::kinematicbody::KinematicBody;
use crate::components::projectile::ProjectileKind;
use crate::components::timer::{Interval, countdown};

const BULLET_RADIUS: f32 = 4.0;
const FLAME_RADIUS: f32 = 8.0;
const FLAME_SPEED: f32 = 240.0;
const FLAME_RANGE: f32 = 160.0;
/// Knockback below this speed is dropped.
const KNOCKBACK_REST: f32 = 1.0;

/// Ranged attack of an enemy that aims at the actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShootingParams {
    /// Seconds between shots while the actor is in range.
    pub interval: f32,
    pub projectile_speed: f32,
    /// Maximum distance to the actor and travel range of the bullet.
    pub range: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    pub size: Vec2,
    pub speed: f32,
    /// Contact damage dealt to the actor.
    pub damage: i32,
    pub max_hp: i32,
    /// RGBA, for the renderer.
    pub color: [u8; 4],
    pub shooting: Option<ShootingParams>,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            size: Vec2::new(32.0, 32.0),
            speed: 80.0,
            damage: 1,
            max_hp: 1,
            color: [200, 40, 40, 255],
            shooting: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolAxis {
    Horizontal,
    Vertical,
}

/// Cardinal direction of a flame emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlamePhase {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Bounces between two left-edge x positions.
    Patrol { min_x: f32, max_x: f32, dir: f32 },
    /// Bounce along one axis. The axis is fixed at construction.
    Flying {
        axis: PatrolAxis,
        min: f32,
        max: f32,
        dir: f32,
    },
    Stationary,
    FlameEmitter {
        direction: Direction,
        active_duration: f32,
        inactive_duration: f32,
        shot_interval: f32,
        phase: FlamePhase,
        phase_timer: f32,
        shot_timer: f32,
    },
    Rotating {
        pivot: Vec2,
        arm_length: f32,
        angle_deg: f32,
        /// Degrees per second; negative turns the other way.
        angular_speed: f32,
        /// Damage circle radius, always half the arm length.
        radius: f32,
    },
}

impl Behavior {
    pub fn patrol(min_x: f32, max_x: f32) -> Self {
        Behavior::Patrol {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            dir: 1.0,
        }
    }

    pub fn flying(axis: PatrolAxis, min: f32, max: f32) -> Self {
        Behavior::Flying {
            axis,
            min: min.min(max),
            max: min.max(max),
            dir: 1.0,
        }
    }

    pub fn flame_emitter(
        direction: Direction,
        active_duration: f32,
        inactive_duration: f32,
        shot_interval: f32,
    ) -> Self {
        Behavior::FlameEmitter {
            direction,
            active_duration,
            inactive_duration,
            shot_interval,
            phase: FlamePhase::Inactive,
            phase_timer: 0.0,
            shot_timer: 0.0,
        }
    }

    pub fn rotating(pivot: Vec2, arm_length: f32, angular_speed: f32) -> Self {
        Behavior::Rotating {
            pivot,
            arm_length,
            angle_deg: 0.0,
            angular_speed,
            radius: arm_length * 0.5,
        }
    }
}

/// A projectile an enemy wants spawned this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub kind: ProjectileKind,
    pub origin: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub range: f32,
    pub radius: f32,
    pub damage: i32,
}

pub type Shots = SmallVec<[Shot; 2]>;

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub body: KinematicBody,
    pub hp: i32,
    pub alive: bool,
    pub stats: EnemyStats,
    pub behavior: Behavior,
    /// Patrol/flight movement is suspended while positive.
    pub stun_timer: f32,
    /// Decaying push-back velocity from a kinetic wave.
    pub knockback: Vec2,
    /// A stomp bounces the actor instead of killing this enemy.
    pub bounce_only: bool,
    shot_clock: Interval,
}

impl Enemy {
    pub fn new(pos: Vec2, stats: EnemyStats, behavior: Behavior) -> Self {
        let interval = stats.shooting.map(|s| s.interval).unwrap_or(0.0);
        let mut enemy = Self {
            body: KinematicBody::new(pos, stats.size),
            hp: stats.max_hp.max(1),
            alive: true,
            stats,
            behavior,
            stun_timer: 0.0,
            knockback: Vec2::ZERO,
            bounce_only: false,
            shot_clock: Interval::new(interval),
        };
        enemy.place_arm();
        enemy
    }

    pub fn with_bounce_only(mut self, bounce_only: bool) -> Self {
        self.bounce_only = bounce_only;
        self
    }

    /// Patrol and flying enemies can be stomped, attacked and pushed.
    pub fn is_stompable(&self) -> bool {
        matches!(
            self.behavior,
            Behavior::Patrol { .. } | Behavior::Flying { .. }
        )
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    /// Contact test against `other`. Rotating hazards use their circle.
    pub fn hits(&self, other: &Aabb) -> bool {
        if !self.alive {
            return false;
        }
        match self.behavior {
            Behavior::Rotating { radius, .. } => other.intersects_circle(self.body.center(), radius),
            _ => self.bounds().overlaps(other),
        }
    }

    /// Advance movement and timers. `target` is the actor's center, if alive.
    pub fn update(&mut self, dt: f32, target: Option<Vec2>, knockback_decay: f32) -> Shots {
        let mut shots = Shots::new();
        if !self.alive {
            return shots;
        }

        countdown(&mut self.stun_timer, dt);
        if self.knockback != Vec2::ZERO {
            self.body.pos += self.knockback * dt;
            self.knockback *= (-knockback_decay * dt).exp();
            if self.knockback.length() < KNOCKBACK_REST {
                self.knockback = Vec2::ZERO;
            }
        }

        let stunned = self.is_stunned();
        let speed = self.stats.speed;
        let center = self.body.center();
        match &mut self.behavior {
            Behavior::Patrol { min_x, max_x, dir } => {
                if !stunned {
                    self.body.vel = Vec2::new(*dir * speed, 0.0);
                    self.body.pos.x += self.body.vel.x * dt;
                } else {
                    self.body.vel = Vec2::ZERO;
                }
                bounce_between(&mut self.body.pos.x, dir, *min_x, *max_x);
            }
            Behavior::Flying {
                axis,
                min,
                max,
                dir,
            } => {
                let (pos, vel) = match axis {
                    PatrolAxis::Horizontal => (&mut self.body.pos.x, &mut self.body.vel.x),
                    PatrolAxis::Vertical => (&mut self.body.pos.y, &mut self.body.vel.y),
                };
                *vel = if stunned { 0.0 } else { *dir * speed };
                *pos += *vel * dt;
                bounce_between(pos, dir, *min, *max);
            }
            Behavior::Stationary => {}
            Behavior::FlameEmitter {
                direction,
                active_duration,
                inactive_duration,
                shot_interval,
                phase,
                phase_timer,
                shot_timer,
            } => {
                *phase_timer += dt;
                match *phase {
                    FlamePhase::Inactive => {
                        if *phase_timer >= *inactive_duration {
                            *phase = FlamePhase::Active;
                            *phase_timer = 0.0;
                            *shot_timer = 0.0;
                            shots.push(flame(center, *direction, self.stats.damage));
                        }
                    }
                    FlamePhase::Active => {
                        if *phase_timer >= *active_duration {
                            *phase = FlamePhase::Inactive;
                            *phase_timer = 0.0;
                            *shot_timer = 0.0;
                        } else if *shot_interval > 0.0 {
                            *shot_timer += dt;
                            if *shot_timer >= *shot_interval {
                                *shot_timer -= *shot_interval;
                                shots.push(flame(center, *direction, self.stats.damage));
                            }
                        }
                    }
                }
            }
            Behavior::Rotating {
                angle_deg,
                angular_speed,
                ..
            } => {
                *angle_deg = (*angle_deg + *angular_speed * dt).rem_euclid(360.0);
            }
        }
        self.place_arm();

        if let (Some(params), Some(target)) = (self.stats.shooting, target) {
            let origin = self.body.center();
            if !self.is_stunned()
                && origin.distance(target) <= params.range
                && self.shot_clock.tick(dt) > 0
            {
                shots.push(Shot {
                    kind: ProjectileKind::Bullet,
                    origin,
                    dir: (target - origin).normalize_or_zero(),
                    speed: params.projectile_speed,
                    range: params.range,
                    radius: BULLET_RADIUS,
                    damage: params.damage,
                });
            }
        }

        shots
    }

    /// Keep a rotating hazard's body centered on the middle of its arm.
    fn place_arm(&mut self) {
        if let Behavior::Rotating {
            pivot,
            arm_length,
            angle_deg,
            radius,
            ..
        } = self.behavior
        {
            let (sin, cos) = angle_deg.to_radians().sin_cos();
            let center = pivot + Vec2::new(cos, sin) * (arm_length * 0.5);
            self.body.size = Vec2::splat(radius * 2.0);
            self.body.pos = center - Vec2::splat(radius);
        }
    }

    /// Apply `amount` damage. Returns `true` if this killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive || amount <= 0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.kill();
            return true;
        }
        false
    }

    pub fn kill(&mut self) {
        self.hp = 0;
        self.alive = false;
        self.body.halt();
        self.knockback = Vec2::ZERO;
    }

    /// Radial push away from `origin` plus a stun. Only mobile enemies move.
    pub fn push_back(&mut self, origin: Vec2, strength: f32, stun: f32) -> bool {
        if !self.alive || !self.is_stompable() {
            return false;
        }
        self.knockback = (self.body.center() - origin).normalize_or_zero() * strength;
        self.stun_timer = self.stun_timer.max(stun);
        true
    }

    /// Reconfigure a flame emitter and restart its cycle.
    pub fn configure_flame(
        &mut self,
        direction: Direction,
        active_duration: f32,
        inactive_duration: f32,
        shot_interval: f32,
    ) {
        if let Behavior::FlameEmitter { .. } = self.behavior {
            self.behavior =
                Behavior::flame_emitter(direction, active_duration, inactive_duration, shot_interval);
        }
    }

    /// Back to `Inactive` with both timers zeroed.
    pub fn reset_flame(&mut self) {
        if let Behavior::FlameEmitter {
            phase,
            phase_timer,
            shot_timer,
            ..
        } = &mut self.behavior
        {
            *phase = FlamePhase::Inactive;
            *phase_timer = 0.0;
            *shot_timer = 0.0;
        }
    }

    pub fn set_arm_length(&mut self, length: f32) {
        if let Behavior::Rotating {
            arm_length, radius, ..
        } = &mut self.behavior
        {
            *arm_length = length.max(0.0);
            *radius = *arm_length * 0.5;
        }
        self.place_arm();
    }

    pub fn set_angular_speed(&mut self, speed: f32) {
        if let Behavior::Rotating { angular_speed, .. } = &mut self.behavior {
            *angular_speed = speed;
        }
    }
}

/// Reverse at either bound, snapping exactly onto it.
fn bounce_between(pos: &mut f32, dir: &mut f32, min: f32, max: f32) {
    if *pos >= max {
        *pos = max;
        *dir = -1.0;
    } else if *pos <= min {
        *pos = min;
        *dir = 1.0;
    }
}

fn flame(origin: Vec2, direction: Direction, damage: i32) -> Shot {
    Shot {
        kind: ProjectileKind::Flame,
        origin,
        dir: direction.vector(),
        speed: FLAME_SPEED,
        range: FLAME_RANGE,
        radius: FLAME_RADIUS,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn patrol(min_x: f32, max_x: f32) -> Enemy {
        Enemy::new(
            Vec2::new(min_x, 400.0),
            EnemyStats::default(),
            Behavior::patrol(min_x, max_x),
        )
    }

    // ==================== PATROL / FLYING ====================

    #[test]
    fn test_patrol_snaps_to_bound_under_large_dt() {
        let mut e = patrol(0.0, 100.0);
        e.update(5.0, None, 6.0);
        assert_eq!(e.body.pos.x, 100.0);
        assert!(matches!(e.behavior, Behavior::Patrol { dir, .. } if dir == -1.0));
        e.update(5.0, None, 6.0);
        assert_eq!(e.body.pos.x, 0.0);
    }

    #[test]
    fn test_patrol_stays_within_bounds() {
        let mut e = patrol(50.0, 130.0);
        for i in 0..500 {
            let dt = if i % 7 == 0 { 0.05 } else { 1.0 / 60.0 };
            e.update(dt, None, 6.0);
            assert!(e.body.pos.x >= 50.0 && e.body.pos.x <= 130.0);
        }
    }

    #[test]
    fn test_patrol_bounds_normalized() {
        assert!(matches!(
            Behavior::patrol(10.0, -10.0),
            Behavior::Patrol { min_x, max_x, .. } if min_x == -10.0 && max_x == 10.0
        ));
    }

    #[test]
    fn test_flying_vertical_moves_on_y_only() {
        let mut e = Enemy::new(
            Vec2::new(300.0, 100.0),
            EnemyStats::default(),
            Behavior::flying(PatrolAxis::Vertical, 100.0, 200.0),
        );
        e.update(0.5, None, 6.0);
        assert_eq!(e.body.pos.x, 300.0);
        assert!(approx_eq(e.body.pos.y, 140.0));
        e.update(10.0, None, 6.0);
        assert_eq!(e.body.pos.y, 200.0);
    }

    #[test]
    fn test_stationary_never_moves_and_is_not_stompable() {
        let mut e = Enemy::new(Vec2::new(10.0, 20.0), EnemyStats::default(), Behavior::Stationary);
        e.update(1.0, Some(Vec2::ZERO), 6.0);
        assert_eq!(e.body.pos, Vec2::new(10.0, 20.0));
        assert!(!e.is_stompable());
        assert!(!e.push_back(Vec2::ZERO, 100.0, 1.0));
    }

    // ==================== DAMAGE ====================

    #[test]
    fn test_take_damage_kills_at_zero() {
        let stats = EnemyStats {
            max_hp: 2,
            ..EnemyStats::default()
        };
        let mut e = Enemy::new(Vec2::ZERO, stats, Behavior::patrol(0.0, 50.0));
        assert!(!e.take_damage(1));
        assert!(e.alive);
        assert!(e.take_damage(5));
        assert_eq!(e.hp, 0);
        assert!(!e.alive);
        assert!(!e.take_damage(1));
    }

    #[test]
    fn test_dead_enemy_is_inert() {
        let mut e = patrol(0.0, 100.0);
        e.kill();
        let before = e.body.pos;
        let shots = e.update(1.0, None, 6.0);
        assert!(shots.is_empty());
        assert_eq!(e.body.pos, before);
        assert!(!e.hits(&e.bounds()));
    }

    // ==================== KNOCKBACK ====================

    #[test]
    fn test_push_back_stuns_and_decays() {
        let mut e = patrol(0.0, 500.0);
        e.body.pos.x = 200.0;
        assert!(e.push_back(Vec2::new(100.0, 416.0), 300.0, 0.5));
        assert!(e.is_stunned());
        assert!(approx_eq(e.knockback.x, 300.0));

        e.update(0.1, None, 6.0);
        assert!(e.body.pos.x > 200.0);
        assert!(e.knockback.x < 300.0);

        for _ in 0..100 {
            e.update(0.05, None, 6.0);
        }
        assert_eq!(e.knockback, Vec2::ZERO);
        assert!(!e.is_stunned());
    }

    #[test]
    fn test_knockback_respects_patrol_bounds() {
        let mut e = patrol(0.0, 100.0);
        e.body.pos.x = 90.0;
        e.push_back(Vec2::new(0.0, 416.0), 5000.0, 1.0);
        e.update(0.05, None, 6.0);
        assert_eq!(e.body.pos.x, 100.0);
    }

    // ==================== FLAME EMITTER ====================

    #[test]
    fn test_flame_emitter_cycles() {
        let mut e = Enemy::new(
            Vec2::ZERO,
            EnemyStats::default(),
            Behavior::flame_emitter(Direction::Right, 1.0, 1.0, 0.25),
        );
        assert!(e.update(0.5, None, 6.0).is_empty());

        let shots = e.update(0.6, None, 6.0);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].kind, ProjectileKind::Flame);
        assert_eq!(shots[0].dir, Vec2::X);
        assert!(matches!(
            e.behavior,
            Behavior::FlameEmitter { phase: FlamePhase::Active, .. }
        ));

        assert_eq!(e.update(0.25, None, 6.0).len(), 1);
        assert!(e.update(0.1, None, 6.0).is_empty());

        e.update(1.0, None, 6.0);
        assert!(matches!(
            e.behavior,
            Behavior::FlameEmitter { phase: FlamePhase::Inactive, .. }
        ));
    }

    #[test]
    fn test_flame_reset_and_configure() {
        let mut e = Enemy::new(
            Vec2::ZERO,
            EnemyStats::default(),
            Behavior::flame_emitter(Direction::Up, 1.0, 0.1, 0.25),
        );
        e.update(0.2, None, 6.0);
        e.reset_flame();
        assert!(matches!(
            e.behavior,
            Behavior::FlameEmitter { phase: FlamePhase::Inactive, phase_timer, shot_timer, .. }
                if phase_timer == 0.0 && shot_timer == 0.0
        ));

        e.configure_flame(Direction::Left, 2.0, 3.0, 0.5);
        assert!(matches!(
            e.behavior,
            Behavior::FlameEmitter { direction: Direction::Left, inactive_duration, .. }
                if inactive_duration == 3.0
        ));
    }

    // ==================== ROTATING ====================

    #[test]
    fn test_rotating_radius_follows_arm_length() {
        let mut e = Enemy::new(
            Vec2::ZERO,
            EnemyStats::default(),
            Behavior::rotating(Vec2::new(100.0, 100.0), 80.0, 90.0),
        );
        assert!(matches!(e.behavior, Behavior::Rotating { radius, .. } if radius == 40.0));
        assert!(approx_eq(e.body.center().x, 140.0));
        assert!(approx_eq(e.body.center().y, 100.0));

        e.set_arm_length(120.0);
        assert!(matches!(e.behavior, Behavior::Rotating { radius, .. } if radius == 60.0));
        assert!(approx_eq(e.body.center().x, 160.0));
    }

    #[test]
    fn test_rotating_angle_wraps_both_ways() {
        let mut e = Enemy::new(
            Vec2::ZERO,
            EnemyStats::default(),
            Behavior::rotating(Vec2::ZERO, 40.0, 90.0),
        );
        e.update(1.0, None, 6.0);
        assert!(approx_eq(e.body.center().y, 20.0));
        e.set_angular_speed(-180.0);
        e.update(1.0, None, 6.0);
        assert!(matches!(e.behavior, Behavior::Rotating { angle_deg, .. } if approx_eq(angle_deg, 270.0)));
    }

    #[test]
    fn test_rotating_hits_with_circle() {
        let e = Enemy::new(
            Vec2::ZERO,
            EnemyStats::default(),
            Behavior::rotating(Vec2::ZERO, 40.0, 0.0),
        );
        // Circle centered at (20, 0), radius 20.
        let corner = Aabb::new(Vec2::new(36.0, 16.0), Vec2::new(10.0, 10.0));
        let inside = Aabb::new(Vec2::new(15.0, -5.0), Vec2::new(10.0, 10.0));
        assert!(e.bounds().overlaps(&corner));
        assert!(!e.hits(&corner));
        assert!(e.hits(&inside));
    }

    // ==================== SHOOTING ====================

    #[test]
    fn test_shooter_fires_only_in_range() {
        let stats = EnemyStats {
            shooting: Some(ShootingParams {
                interval: 1.0,
                projectile_speed: 200.0,
                range: 300.0,
                damage: 1,
            }),
            ..EnemyStats::default()
        };
        let mut e = Enemy::new(Vec2::ZERO, stats, Behavior::Stationary);
        let far = Vec2::new(1000.0, 16.0);
        let near = Vec2::new(216.0, 16.0);

        assert!(e.update(2.0, Some(far), 6.0).is_empty());
        assert!(e.update(0.5, Some(near), 6.0).is_empty());
        let shots = e.update(0.6, Some(near), 6.0);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].kind, ProjectileKind::Bullet);
        assert!(approx_eq(shots[0].dir.x, 1.0));
        assert!(e.update(0.5, None, 6.0).is_empty());
    }
}
