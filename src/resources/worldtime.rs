//! Simulation clock.
//!
//! Updated once per frame by [`update_world_time`](crate::systems::time::update_world_time)
//! before the update schedule runs.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since the scene started, scaled.
    pub elapsed: f32,
    /// Seconds since the previous tick, scaled.
    pub delta: f32,
    pub time_scale: f32,
    /// Number of ticks seen so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
