//! Actor update system.
//!
//! Feeds the sampled [`InputState`] and the clamped delta into
//! [`Actor::update`], forwards the produced events, and spawns the kinetic
//! wave projectile when the striker's ability fires.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::actor::Actor;
use crate::components::character::Ability;
use crate::components::projectile::{Projectile, ProjectileKind};
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

pub fn actor_update_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut actors: Query<&mut Actor>,
    mut writer: MessageWriter<SimEvent>,
) {
    for mut actor in actors.iter_mut() {
        let events = actor.update(&input, &config, time.delta);
        for event in events {
            writer.write(event);
            match event {
                SimEvent::AbilityActivated { ability } => {
                    debug!("{:?} activated {:?}", actor.character(), ability);
                    if ability == Ability::KineticWave {
                        let (origin, dir) = actor.wave_origin();
                        commands.spawn(Projectile::new(
                            ProjectileKind::KineticWave,
                            origin,
                            dir,
                            config.ability.wave_speed,
                            config.ability.wave_range,
                            config.ability.wave_radius,
                            0,
                        ));
                        writer.write(SimEvent::ProjectileFired {
                            kind: ProjectileKind::KineticWave,
                        });
                    }
                }
                SimEvent::AbilityEnded { ability } => debug!("{:?} ended", ability),
                SimEvent::Respawned => info!("Actor respawned at {:?}", actor.spawn_point),
                _ => {}
            }
        }
    }
}
