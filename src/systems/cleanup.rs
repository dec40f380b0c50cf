//! Deferred deletion.
//!
//! Gameplay systems only clear `alive` (or set `collected`). This pass runs
//! last in the step and despawns everything flagged, so no system removes
//! entities while another is iterating them.
use bevy_ecs::prelude::*;

use crate::components::enemy::Enemy;
use crate::components::pickup::Pickup;
use crate::components::projectile::Projectile;

pub fn cleanup_system(
    mut commands: Commands,
    enemies: Query<(Entity, &Enemy)>,
    projectiles: Query<(Entity, &Projectile)>,
    pickups: Query<(Entity, &Pickup)>,
) {
    for (entity, enemy) in enemies.iter() {
        if !enemy.alive {
            commands.entity(entity).despawn();
        }
    }
    for (entity, projectile) in projectiles.iter() {
        if !projectile.alive {
            commands.entity(entity).despawn();
        }
    }
    for (entity, pickup) in pickups.iter() {
        if pickup.collected {
            commands.entity(entity).despawn();
        }
    }
}
