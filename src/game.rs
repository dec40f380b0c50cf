//! Frame orchestrator.
//!
//! [`Game`] owns the ECS world and the step schedule. Each call to
//! [`Game::step`] runs exactly one simulation step:
//!
//! 1. sample input from the caller's [`InputSource`]
//! 2. clamp and scale the frame delta into [`WorldTime`]
//! 3. run the chained step schedule (only while [`GameStates::Playing`]):
//!    actor update → platform collision → enemy update → combat →
//!    projectiles → interactions → cleanup
//! 4. apply any pending game state transition
//! 5. drain the frame's [`SimEvent`]s into a [`FrameEvents`] value
//!
//! Platform collision runs before combat, so hazard checks always see the
//! corrected actor position.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::aabb::Aabb;
use crate::components::actor::Actor;
use crate::components::character::Character;
use crate::components::checkpoint::Checkpoint;
use crate::components::enemy::Enemy;
use crate::components::goal::Goal;
use crate::components::pickup::Pickup;
use crate::components::platform::Platform;
use crate::components::projectile::Projectile;
use crate::components::terminal::Terminal;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::simulation::{FrameEvents, SimEvent};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputSource, InputState};
use crate::resources::leveldata::LevelData;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::worldtime::WorldTime;
use crate::systems::actor::actor_update_system;
use crate::systems::cleanup::cleanup_system;
use crate::systems::collision::platform_collision_system;
use crate::systems::combat::combat_system;
use crate::systems::enemy::enemy_update_system;
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::input::update_input_state;
use crate::systems::interaction::interaction_system;
use crate::systems::projectile::projectile_system;
use crate::systems::time::update_world_time;

/// Everything a level spawns. Despawned on level unload.
type LevelEntity = Or<(
    With<Actor>,
    With<Enemy>,
    With<Platform>,
    With<Projectile>,
    With<Checkpoint>,
    With<Pickup>,
    With<Terminal>,
    With<Goal>,
)>;

/// Build the per-frame step schedule.
pub fn build_step_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            (
                actor_update_system,
                platform_collision_system,
                enemy_update_system,
                combat_system,
                projectile_system,
                interaction_system,
                cleanup_system,
            )
                .chain()
                .run_if(state_is_playing),
            check_pending_state,
        )
            .chain(),
    );
    update
}

pub struct Game {
    world: World,
    update: Schedule,
    actor: Option<Entity>,
    character: Character,
    level_name: String,
    next_level: Option<String>,
}

impl Game {
    /// Create an orchestrator with no level loaded.
    pub fn new(config: GameConfig, character: Character) -> Self {
        let mut world = World::new();
        world.insert_resource(SpatialGrid::new(config.grid_cell_size));
        world.insert_resource(config);
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(InputState::default());
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.init_resource::<Messages<SimEvent>>();
        world.spawn(Observer::new(observe_gamestate_change_event));
        // Ensure the observer is registered before anything triggers a transition.
        world.flush();

        Self {
            world,
            update: build_step_schedule(),
            actor: None,
            character,
            level_name: String::new(),
            next_level: None,
        }
    }

    /// Unload the current level, spawn `level` and enter [`GameStates::Playing`].
    pub fn load_level(&mut self, level: &LevelData) {
        self.clear_level();
        let config = self.world.resource::<GameConfig>().clone();

        let platforms = level.all_platforms();
        for p in &platforms {
            self.world.spawn(Platform::new(p.pos, p.size, p.kind));
        }
        for e in &level.enemies {
            self.world.spawn(
                Enemy::new(e.pos, e.stats.clone(), e.behavior.build())
                    .with_bounce_only(e.bounce_only),
            );
        }
        for c in &level.checkpoints {
            self.world.spawn(Checkpoint::new(c.bounds()));
        }
        for p in &level.pickups {
            self.world.spawn(Pickup::new(Aabb::new(p.pos, p.size), p.kind));
        }
        for t in &level.terminals {
            self.world.spawn(Terminal::new(t.bounds()));
        }
        if let Some(goal) = &level.goal {
            self.world.spawn(Goal {
                bounds: goal.bounds(),
            });
        } else {
            warn!("Level '{}' has no goal", level.name);
        }
        let actor = Actor::new(self.character, level.spawn, &config);
        self.actor = Some(self.world.spawn(actor).id());

        self.level_name = level.name.clone();
        self.next_level = level.next_level.clone();
        info!(
            "Loaded level '{}': {} platforms, {} enemies, spawn at {:?}",
            level.name,
            platforms.len(),
            level.enemies.len(),
            level.spawn
        );

        self.world
            .resource_mut::<NextGameState>()
            .set(GameStates::Playing);
        self.world.trigger(GameStateChangedEvent {});
        self.world.flush();
    }

    fn clear_level(&mut self) {
        let entities: Vec<Entity> = self
            .world
            .query_filtered::<Entity, LevelEntity>()
            .iter(&self.world)
            .collect();
        for entity in entities {
            self.world.despawn(entity);
        }
        self.actor = None;
        self.world.resource_mut::<SpatialGrid>().clear();
        self.world.resource_mut::<Messages<SimEvent>>().clear();
    }

    /// Run one simulation step with the raw frame delta in seconds.
    pub fn step(&mut self, raw_dt: f32, input: &dyn InputSource) -> FrameEvents {
        update_input_state(&mut self.world, input);
        update_world_time(&mut self.world, raw_dt);
        self.update.run(&mut self.world);
        self.world.clear_trackers();

        let events: Vec<SimEvent> = self
            .world
            .resource_mut::<Messages<SimEvent>>()
            .drain()
            .collect();
        FrameEvents::new(events)
    }

    /// Replace the actor with a fresh one of `character`.
    ///
    /// Position, spawn point, facing and health carry over; every timer and
    /// gate starts fresh. A dead actor stays dead and keeps its respawn
    /// countdown.
    pub fn switch_character(&mut self, character: Character) {
        if character == self.character {
            return;
        }
        self.character = character;
        let Some(entity) = self.actor else {
            return;
        };
        let Some(old) = self.world.get::<Actor>(entity).cloned() else {
            return;
        };
        let config = self.world.resource::<GameConfig>();
        let mut fresh = Actor::new(character, old.spawn_point, config);
        fresh.body.pos = old.body.pos;
        fresh.body.grounded = old.body.grounded;
        fresh.facing = old.facing;
        if old.dead {
            // Still waiting to respawn: the new identity inherits the countdown.
            fresh.body.halt();
            fresh.health = 0;
            fresh.dead = true;
            fresh.respawn_timer = old.respawn_timer;
        } else {
            fresh.health = old.health.clamp(1, fresh.max_health);
        }
        info!("Switched character to {:?}", character);
        self.world.entity_mut(entity).insert(fresh);
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.and_then(|e| self.world.get::<Actor>(e))
    }

    pub fn actor_mut(&mut self) -> Option<Mut<'_, Actor>> {
        self.actor.and_then(|e| self.world.get_mut::<Actor>(e))
    }

    pub fn actor_entity(&self) -> Option<Entity> {
        self.actor
    }

    pub fn state(&self) -> GameStates {
        *self.world.resource::<GameState>().get()
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Level to load after this one is completed, if any.
    pub fn next_level(&self) -> Option<&str> {
        self.next_level.as_deref()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    /// Living enemies currently in the level.
    pub fn enemy_count(&mut self) -> usize {
        self.world
            .query::<&Enemy>()
            .iter(&self.world)
            .filter(|e| e.alive)
            .count()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
