//! Stompcore simulation library.
//!
//! A deterministic 2D platformer simulation core built on `bevy_ecs`. The
//! crate owns gameplay state only: actors, enemies, projectiles, platforms
//! and level objects, advanced one fixed step at a time by
//! [`game::Game::step`]. Rendering, audio and hardware input are left to
//! collaborators, which feed an [`resources::input::InputSource`] in and read
//! [`events::simulation::FrameEvents`] back out.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
