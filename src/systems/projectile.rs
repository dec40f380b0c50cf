//! Projectile movement and hits.
//!
//! The broad-phase [`SpatialGrid`] is rebuilt from the living enemies at the
//! start of the pass. A kinetic wave looks up nearby enemies through the
//! grid and, on the first frame it touches any of them, pushes back every
//! enemy inside its radius and dies. Enemy bullets and flames hurt the
//! actor and die on first hit.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actor::Actor;
use crate::components::enemy::Enemy;
use crate::components::projectile::Projectile;
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::worldtime::WorldTime;
use crate::systems::combat::apply_damage;

pub fn projectile_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut grid: ResMut<SpatialGrid>,
    mut projectiles: Query<&mut Projectile>,
    mut enemies: Query<(Entity, &mut Enemy)>,
    mut actors: Query<&mut Actor>,
    mut writer: MessageWriter<SimEvent>,
) {
    grid.clear();
    for (entity, enemy) in enemies.iter() {
        if enemy.alive {
            grid.insert(entity, &enemy.bounds());
        }
    }

    for mut projectile in projectiles.iter_mut() {
        projectile.update(time.delta);
        if !projectile.alive {
            continue;
        }

        if projectile.kind.hurts_actor() {
            for mut actor in actors.iter_mut() {
                if actor.dead || !projectile.hits(&actor.bounds()) {
                    continue;
                }
                projectile.kill();
                apply_damage(&mut actor, projectile.damage, &config, &mut writer);
                break;
            }
            continue;
        }

        let center = projectile.pos;
        let radius = projectile.radius;
        let mut touched = false;
        for candidate in grid.query_circle(center, radius) {
            let Ok((entity, mut enemy)) = enemies.get_mut(candidate) else {
                continue;
            };
            if !enemy.alive || !enemy.bounds().intersects_circle(center, radius) {
                continue;
            }
            touched = true;
            if enemy.push_back(center, config.ability.wave_push, config.ability.wave_stun) {
                debug!("Enemy {:?} pushed by kinetic wave", entity);
                writer.write(SimEvent::EnemyPushed { enemy: entity });
            }
        }
        if touched {
            projectile.kill();
        }
    }
}
