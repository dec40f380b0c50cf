//! Actor vs enemy resolution.
//!
//! Runs after the platform pass and the enemy update, so it sees the
//! corrected actor position and the enemies' positions for this frame.
//!
//! - The pending attack hitbox damages every attackable enemy it overlaps.
//! - Body contact is classified by [`classify_contact`]: a falling actor
//!   whose bottom edge is within the stomp tolerance of the enemy's top
//!   stomps it, anything else hurts the actor.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::actor::{Actor, DamageOutcome};
use crate::components::enemy::Enemy;
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;

/// Result of the actor touching an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Enemy dies, actor bounces.
    Stomp,
    /// Actor bounces, enemy survives.
    Bounce,
    /// Actor takes contact damage.
    Damage,
}

/// Falling and bottom edge above `enemy_top + tolerance`.
pub fn is_stomp(actor_vel_y: f32, actor_bottom: f32, enemy_top: f32, tolerance: f32) -> bool {
    actor_vel_y > 0.0 && actor_bottom <= enemy_top + tolerance
}

/// Decide what a contact does. Non-stompable hazards always damage.
pub fn classify_contact(
    actor_vel_y: f32,
    actor_bottom: f32,
    enemy_top: f32,
    tolerance: f32,
    stompable: bool,
    bounce_only: bool,
) -> ContactOutcome {
    if !stompable || !is_stomp(actor_vel_y, actor_bottom, enemy_top, tolerance) {
        ContactOutcome::Damage
    } else if bounce_only {
        ContactOutcome::Bounce
    } else {
        ContactOutcome::Stomp
    }
}

/// Apply damage to the actor and report the outcome.
pub(crate) fn apply_damage(
    actor: &mut Actor,
    amount: i32,
    config: &GameConfig,
    writer: &mut MessageWriter<SimEvent>,
) -> DamageOutcome {
    let outcome = actor.take_damage(amount, config);
    match outcome {
        DamageOutcome::Hurt => {
            writer.write(SimEvent::Hurt {
                health: actor.health,
            });
        }
        DamageOutcome::Killed => {
            writer.write(SimEvent::Hurt { health: 0 });
            writer.write(SimEvent::Died);
            info!("Actor died at {:?}", actor.body.pos);
        }
        DamageOutcome::Ignored => {}
    }
    outcome
}

pub fn combat_system(
    config: Res<GameConfig>,
    mut actors: Query<&mut Actor>,
    mut enemies: Query<(Entity, &mut Enemy)>,
    mut writer: MessageWriter<SimEvent>,
) {
    let epsilon = config.physics.collision_epsilon;
    for mut actor in actors.iter_mut() {
        if actor.dead {
            continue;
        }

        if let Some(hitbox) = actor.take_pending_attack(&config) {
            for (entity, mut enemy) in enemies.iter_mut() {
                if enemy.is_stompable()
                    && enemy.hits(&hitbox)
                    && enemy.take_damage(config.combat.attack_damage)
                {
                    debug!("Enemy {:?} killed by attack", entity);
                    writer.write(SimEvent::EnemyKilled { enemy: entity });
                }
            }
        }

        let tolerance =
            config.combat.stomp_tolerance * config.character(actor.character()).stomp_multiplier;
        for (entity, mut enemy) in enemies.iter_mut() {
            if actor.dead {
                break;
            }
            if !enemy.hits(&actor.bounds()) {
                continue;
            }
            let enemy_top = enemy.bounds().top();
            let outcome = classify_contact(
                actor.body.vel.y,
                actor.body.bottom(),
                enemy_top,
                tolerance,
                enemy.is_stompable(),
                enemy.bounce_only,
            );
            match outcome {
                ContactOutcome::Stomp | ContactOutcome::Bounce => {
                    actor.body.pos.y = enemy_top - actor.body.size.y - epsilon;
                    actor.bounce(config.combat.stomp_bounce, &config);
                    if outcome == ContactOutcome::Stomp {
                        enemy.kill();
                        debug!("Enemy {:?} stomped", entity);
                        writer.write(SimEvent::EnemyStomped { enemy: entity });
                    } else {
                        writer.write(SimEvent::EnemyBounced { enemy: entity });
                    }
                }
                ContactOutcome::Damage => {
                    let damage = enemy.stats.damage;
                    apply_damage(&mut actor, damage, &config, &mut writer);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_within_tolerance_is_stomp() {
        assert!(is_stomp(100.0, 405.0, 400.0, 12.0));
        assert!(is_stomp(100.0, 412.0, 400.0, 12.0));
        assert!(!is_stomp(100.0, 412.5, 400.0, 12.0));
    }

    #[test]
    fn test_rising_is_never_stomp() {
        assert!(!is_stomp(-1.0, 401.0, 400.0, 12.0));
        assert!(!is_stomp(0.0, 401.0, 400.0, 12.0));
    }

    #[test]
    fn test_multiplier_widens_tolerance() {
        assert!(!is_stomp(50.0, 415.0, 400.0, 12.0));
        assert!(is_stomp(50.0, 415.0, 400.0, 12.0 * 1.5));
    }

    #[test]
    fn test_classify_contact() {
        assert_eq!(
            classify_contact(100.0, 405.0, 400.0, 12.0, true, false),
            ContactOutcome::Stomp
        );
        assert_eq!(
            classify_contact(100.0, 405.0, 400.0, 12.0, true, true),
            ContactOutcome::Bounce
        );
        assert_eq!(
            classify_contact(100.0, 405.0, 400.0, 12.0, false, false),
            ContactOutcome::Damage
        );
        assert_eq!(
            classify_contact(100.0, 430.0, 400.0, 12.0, true, false),
            ContactOutcome::Damage
        );
    }
}
