//! Checkpoints, pickups, terminals and the level goal.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::actor::Actor;
use crate::components::checkpoint::Checkpoint;
use crate::components::goal::Goal;
use crate::components::pickup::{Pickup, PickupKind};
use crate::components::terminal::Terminal;
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};

#[allow(clippy::too_many_arguments)]
pub fn interaction_system(
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
    mut actors: Query<&mut Actor>,
    mut checkpoints: Query<&mut Checkpoint>,
    mut pickups: Query<&mut Pickup>,
    mut terminals: Query<(Entity, &mut Terminal)>,
    goals: Query<&Goal>,
    mut writer: MessageWriter<SimEvent>,
) {
    for mut actor in actors.iter_mut() {
        if actor.dead {
            continue;
        }
        let bounds = actor.bounds();

        for mut checkpoint in checkpoints.iter_mut() {
            if checkpoint.active || !checkpoint.bounds.overlaps(&bounds) {
                continue;
            }
            checkpoint.active = true;
            let position = checkpoint.spawn_point(actor.body.size);
            actor.set_spawn_point(position);
            info!("Checkpoint activated at {:?}", position);
            writer.write(SimEvent::CheckpointActivated { position });
        }

        for mut pickup in pickups.iter_mut() {
            if pickup.collected || !pickup.bounds.overlaps(&bounds) {
                continue;
            }
            pickup.collected = true;
            writer.write(SimEvent::PickupCollected { kind: pickup.kind });
            if let PickupKind::Heart(amount) = pickup.kind
                && actor.heal(amount) > 0
            {
                writer.write(SimEvent::Healed {
                    health: actor.health,
                });
            }
        }

        if actor.is_hacking() {
            let center = actor.body.center();
            for (entity, mut terminal) in terminals.iter_mut() {
                if terminal.hacked || !terminal.in_reach(center, config.ability.hack_radius) {
                    continue;
                }
                terminal.hacked = true;
                info!("Terminal {:?} hacked", entity);
                writer.write(SimEvent::TerminalHacked { terminal: entity });
            }
        }

        if goals.iter().any(|goal| goal.bounds.overlaps(&bounds)) {
            next_state.set(GameStates::LevelComplete);
            writer.write(SimEvent::LevelCompleted);
            return;
        }
    }
}
