//! One-shot simulation events for presentation collaborators.
//!
//! Systems write [`SimEvent`] messages while the frame runs. At the end of
//! the frame the orchestrator drains them into a [`FrameEvents`] value and
//! returns it from [`Game::step`](crate::game::Game::step). Audio, particles,
//! camera shake and UI consume that value; they are never queried back.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::character::Ability;
use crate::components::pickup::PickupKind;
use crate::components::projectile::ProjectileKind;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Ground or coyote jump.
    Jumped,
    /// Mid-air jump.
    AirJumped,
    /// Airborne to grounded transition.
    Landed,
    Dashed,
    Attacked,
    AbilityActivated { ability: Ability },
    AbilityEnded { ability: Ability },
    Hurt { health: i32 },
    Healed { health: i32 },
    Died,
    Respawned,
    /// Enemy killed by landing on it.
    EnemyStomped { enemy: Entity },
    /// Stomp on an enemy that only bounces the actor.
    EnemyBounced { enemy: Entity },
    /// Enemy killed by an attack.
    EnemyKilled { enemy: Entity },
    /// Enemy hit by a kinetic wave.
    EnemyPushed { enemy: Entity },
    ProjectileFired { kind: ProjectileKind },
    CheckpointActivated { position: Vec2 },
    PickupCollected { kind: PickupKind },
    TerminalHacked { terminal: Entity },
    LevelCompleted,
}

/// Events emitted during one simulation step, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    events: Vec<SimEvent>,
}

impl FrameEvents {
    pub fn new(events: Vec<SimEvent>) -> Self {
        Self { events }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event: &SimEvent) -> bool {
        self.events.contains(event)
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&SimEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn any(&self, pred: impl Fn(&SimEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }

    pub fn just_jumped(&self) -> bool {
        self.any(|e| matches!(e, SimEvent::Jumped | SimEvent::AirJumped))
    }

    pub fn just_landed(&self) -> bool {
        self.contains(&SimEvent::Landed)
    }

    pub fn died(&self) -> bool {
        self.contains(&SimEvent::Died)
    }

    pub fn into_vec(self) -> Vec<SimEvent> {
        self.events
    }
}

impl IntoIterator for FrameEvents {
    type Item = SimEvent;
    type IntoIter = std::vec::IntoIter<SimEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
