//! ECS resources made available to systems.
//!
//! Overview
//! - `gameconfig` – tuning constants loaded from an INI file
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame action state and the input source seam
//! - `leveldata` – JSON level descriptions
//! - `spatialgrid` – uniform-grid broad phase over enemies
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod leveldata;
pub mod spatialgrid;
pub mod worldtime;
