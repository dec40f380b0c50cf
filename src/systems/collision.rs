//! Static collision resolution.
//!
//! [`resolve_static_collision`] pushes a moving body out of one static box
//! along the axis of minimum penetration. The platform pass calls it once per
//! (actor, platform) pair per frame: there is no iterative solver and no
//! sub-stepping, so very fast bodies can tunnel through thin platforms.
//!
//! Every snap leaves a gap of `epsilon` so the corrected box does not
//! overlap again through float equality. A grounded body resting in that gap
//! is kept grounded by [`rests_on`].

use bevy_ecs::prelude::*;
use log::info;

use crate::components::aabb::Aabb;
use crate::components::actor::Actor;
use crate::components::kinematicbody::KinematicBody;
use crate::components::platform::Platform;
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;

/// Which side of the moving body touched the obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Landed on top of the obstacle.
    Floor,
    /// Hit the obstacle's underside.
    Ceiling,
    /// Body's left side hit the obstacle's right edge.
    Left,
    /// Body's right side hit the obstacle's left edge.
    Right,
}

/// Resolve one overlap between `body` and a static `obstacle`.
///
/// Horizontal resolution is chosen only when its overlap is strictly less
/// than the vertical one. Landing sets `grounded`; a ceiling hit leaves it
/// unchanged. Returns `None` when the boxes do not overlap.
pub fn resolve_static_collision(
    body: &mut KinematicBody,
    obstacle: &Aabb,
    epsilon: f32,
) -> Option<Contact> {
    let b = body.bounds();
    if !b.overlaps(obstacle) {
        return None;
    }

    let push_left = b.right() - obstacle.left();
    let push_right = obstacle.right() - b.left();
    let push_up = b.bottom() - obstacle.top();
    let push_down = obstacle.bottom() - b.top();
    let overlap_x = push_left.min(push_right);
    let overlap_y = push_up.min(push_down);

    if overlap_x < overlap_y {
        body.vel.x = 0.0;
        if push_left < push_right {
            body.pos.x = obstacle.left() - body.size.x - epsilon;
            Some(Contact::Right)
        } else {
            body.pos.x = obstacle.right() + epsilon;
            Some(Contact::Left)
        }
    } else if b.top() < obstacle.top() {
        body.pos.y = obstacle.top() - body.size.y - epsilon;
        body.vel.y = 0.0;
        body.grounded = true;
        Some(Contact::Floor)
    } else {
        body.pos.y = obstacle.bottom() + epsilon;
        body.vel.y = 0.0;
        Some(Contact::Ceiling)
    }
}

/// Support probe: `body` sits on `obstacle`'s top within the snap gap and
/// is not moving up.
pub fn rests_on(body: &KinematicBody, obstacle: &Aabb, epsilon: f32) -> bool {
    let b = body.bounds();
    let gap = obstacle.top() - b.bottom();
    body.vel.y >= 0.0
        && b.right() > obstacle.left()
        && b.left() < obstacle.right()
        && (0.0..=epsilon * 2.0).contains(&gap)
}

/// Resolve the actor against every platform, update grounding, then apply
/// the death zone.
///
/// Runs right after the actor update so hazard checks later in the frame see
/// the corrected position.
pub fn platform_collision_system(
    config: Res<GameConfig>,
    platforms: Query<&Platform>,
    mut actors: Query<&mut Actor>,
    mut writer: MessageWriter<SimEvent>,
) {
    let epsilon = config.physics.collision_epsilon;
    for mut actor in actors.iter_mut() {
        if actor.dead {
            continue;
        }
        let was_grounded = actor.begin_ground_pass();
        for platform in platforms.iter() {
            resolve_static_collision(&mut actor.body, platform.bounds(), epsilon);
        }
        if !actor.body.grounded
            && platforms
                .iter()
                .any(|p| rests_on(&actor.body, p.bounds(), epsilon))
        {
            actor.body.grounded = true;
        }
        for event in actor.finish_ground_pass(was_grounded, &config) {
            writer.write(event);
        }

        if actor.body.pos.y > config.physics.death_zone_y && actor.kill(&config) {
            info!("Actor fell into the death zone at {:?}", actor.body.pos);
            writer.write(SimEvent::Died);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const EPS: f32 = 0.01;
    const TOLERANCE: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn platform() -> Aabb {
        Aabb::new(Vec2::new(0.0, 500.0), Vec2::new(400.0, 50.0))
    }

    fn body_at(x: f32, y: f32, vel: Vec2) -> KinematicBody {
        let mut body = KinematicBody::new(Vec2::new(x, y), Vec2::new(32.0, 48.0));
        body.vel = vel;
        body
    }

    #[test]
    fn test_landing_snaps_on_top() {
        let mut body = body_at(100.0, 460.0, Vec2::new(50.0, 300.0));
        let contact = resolve_static_collision(&mut body, &platform(), EPS);
        assert_eq!(contact, Some(Contact::Floor));
        assert!(approx_eq(body.pos.y, 500.0 - 48.0 - EPS));
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.vel.x, 50.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_ceiling_hit_keeps_grounded_flag() {
        let mut body = body_at(100.0, 540.0, Vec2::new(0.0, -300.0));
        let contact = resolve_static_collision(&mut body, &platform(), EPS);
        assert_eq!(contact, Some(Contact::Ceiling));
        assert!(approx_eq(body.pos.y, 550.0 + EPS));
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_wall_hits_resolve_horizontally() {
        let mut body = body_at(-28.0, 480.0, Vec2::new(200.0, 0.0));
        assert_eq!(
            resolve_static_collision(&mut body, &platform(), EPS),
            Some(Contact::Right)
        );
        assert!(approx_eq(body.pos.x, -32.0 - EPS));
        assert_eq!(body.vel.x, 0.0);

        let mut body = body_at(396.0, 480.0, Vec2::new(-200.0, 0.0));
        assert_eq!(
            resolve_static_collision(&mut body, &platform(), EPS),
            Some(Contact::Left)
        );
        assert!(approx_eq(body.pos.x, 400.0 + EPS));
        assert!(!body.grounded);
    }

    #[test]
    fn test_equal_overlap_resolves_vertically() {
        // 4 units deep on both axes.
        let mut body = body_at(-28.0, 456.0, Vec2::new(10.0, 10.0));
        assert_eq!(
            resolve_static_collision(&mut body, &platform(), EPS),
            Some(Contact::Floor)
        );
        assert_eq!(body.vel.x, 10.0);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut body = body_at(100.0, 452.0, Vec2::ZERO);
        assert_eq!(resolve_static_collision(&mut body, &platform(), EPS), None);
        assert_eq!(body.pos, Vec2::new(100.0, 452.0));
    }

    #[test]
    fn test_resolved_body_no_longer_overlaps() {
        let mut body = body_at(100.0, 470.0, Vec2::new(0.0, 100.0));
        resolve_static_collision(&mut body, &platform(), EPS);
        assert_eq!(resolve_static_collision(&mut body, &platform(), EPS), None);
    }

    #[test]
    fn test_rests_on_within_gap() {
        let plat = platform();
        let resting = body_at(100.0, 500.0 - 48.0 - EPS, Vec2::ZERO);
        assert!(rests_on(&resting, &plat, EPS));

        let rising = body_at(100.0, 500.0 - 48.0 - EPS, Vec2::new(0.0, -10.0));
        assert!(!rests_on(&rising, &plat, EPS));

        let off_edge = body_at(401.0, 500.0 - 48.0 - EPS, Vec2::ZERO);
        assert!(!rests_on(&off_edge, &plat, EPS));

        let hovering = body_at(100.0, 440.0, Vec2::ZERO);
        assert!(!rests_on(&hovering, &plat, EPS));
    }

    #[test]
    fn test_grounded_body_does_not_drift() {
        let plat = platform();
        let mut body = body_at(100.0, 460.0, Vec2::new(0.0, 200.0));
        resolve_static_collision(&mut body, &plat, EPS);
        let rest = body.pos;
        for _ in 0..240 {
            body.step(1800.0, 900.0, 0.05);
            body.grounded = false;
            resolve_static_collision(&mut body, &plat, EPS);
            if !body.grounded && rests_on(&body, &plat, EPS) {
                body.grounded = true;
            }
            assert!(body.grounded);
        }
        assert_eq!(body.pos, rest);
    }
}
