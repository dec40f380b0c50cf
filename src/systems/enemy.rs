use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::enemy::Enemy;
use crate::components::projectile::Projectile;
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Advance every enemy and spawn the projectiles they fire.
///
/// Shooters aim at the center of the first living actor.
pub fn enemy_update_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    actors: Query<&Actor>,
    mut enemies: Query<&mut Enemy>,
    mut writer: MessageWriter<SimEvent>,
) {
    let target = actors
        .iter()
        .find(|a| a.is_alive())
        .map(|a| a.body.center());
    for mut enemy in enemies.iter_mut() {
        for shot in enemy.update(time.delta, target, config.ability.knockback_decay) {
            commands.spawn(Projectile::new(
                shot.kind,
                shot.origin,
                shot.dir,
                shot.speed,
                shot.range,
                shot.radius,
                shot.damage,
            ));
            writer.write(SimEvent::ProjectileFired { kind: shot.kind });
        }
    }
}
