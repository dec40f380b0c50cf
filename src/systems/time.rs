//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame. The raw delta is clamped to
//! [`PhysicsTuning::max_delta`](crate::resources::gameconfig::PhysicsTuning)
//! before scaling, which keeps a stalled frame from producing one huge
//! integration step.
use bevy_ecs::prelude::*;

use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Clamp a raw frame delta into `[0, max_delta]`.
///
/// Non-finite deltas are treated as zero.
pub fn clamp_delta(raw_dt: f32, max_delta: f32) -> f32 {
    if !raw_dt.is_finite() {
        return 0.0;
    }
    raw_dt.clamp(0.0, max_delta.max(0.0))
}

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the unscaled frame delta in seconds. The clamp uses the
/// [`GameConfig`] resource when present.
pub fn update_world_time(world: &mut World, dt: f32) {
    let max_delta = world
        .get_resource::<GameConfig>()
        .map(|c| c.physics.max_delta)
        .unwrap_or(f32::MAX);
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = clamp_delta(dt, max_delta) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}
