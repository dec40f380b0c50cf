//! ECS components for simulation entities.
//!
//! Submodules overview:
//! - [`aabb`] – axis-aligned box geometry shared by every collidable thing
//! - [`actor`] – the player-controlled actor and its movement state machine
//! - [`character`] – character identities, abilities and ability bookkeeping
//! - [`checkpoint`] – respawn markers that activate on first touch
//! - [`enemy`] – hazards and their behaviour variants
//! - [`goal`] – level exit region
//! - [`kinematicbody`] – position, velocity and integration
//! - [`pickup`] – collectible hearts and coins
//! - [`platform`] – static solid geometry
//! - [`projectile`] – bullets, flames and kinetic waves
//! - [`terminal`] – hackable level objects
//! - [`timer`] – countdown helpers and a repeating interval

pub mod aabb;
pub mod actor;
pub mod character;
pub mod checkpoint;
pub mod enemy;
pub mod goal;
pub mod kinematicbody;
pub mod pickup;
pub mod platform;
pub mod projectile;
pub mod terminal;
pub mod timer;
