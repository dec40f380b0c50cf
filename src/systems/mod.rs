//! Simulation systems.
//!
//! Submodules overview, in step order:
//! - [`input`] – sample the input source into [`crate::resources::input::InputState`]
//! - [`time`] – clamp and scale the frame delta
//! - [`actor`] – advance the actor state machine and spawn ability projectiles
//! - [`collision`] – resolve the actor against static platforms
//! - [`enemy`] – advance enemy behaviours and fire enemy shots
//! - [`combat`] – attacks, stomps and contact damage
//! - [`projectile`] – move projectiles and apply hits through the broad phase
//! - [`interaction`] – checkpoints, pickups, terminals and the goal
//! - [`cleanup`] – despawn dead and collected entities
//! - [`gamestate`] – apply pending state transitions

pub mod actor;
pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod gamestate;
pub mod input;
pub mod interaction;
pub mod projectile;
pub mod time;
