//! Event types and observers.
//!
//! Submodules:
//! - [`gamestate`] – state transition trigger and its observer
//! - [`simulation`] – one-shot gameplay events collected per frame
pub mod gamestate;
pub mod simulation;
