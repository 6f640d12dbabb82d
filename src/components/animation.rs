//! Per-entity animation playback state.
//!
//! Clips live in the [`AnimationStore`](crate::resources::animationstore::AnimationStore);
//! this component only remembers which clip is on, where in it the entity is
//! and whether it is still advancing. The
//! [`animation`](crate::systems::animation::animation) system does the stepping.

use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Component, Default, PartialEq)]
pub struct Animation {
    /// Clip currently assigned, if any.
    pub animation_key: Option<String>,
    pub frame_index: usize,
    /// Seconds spent on the current frame.
    pub elapsed_time: f32,
    /// Completed passes through the clip since it started.
    pub repeats_done: u32,
    /// Whether the clip advances. A stopped clip keeps its last frame.
    pub playing: bool,
}

impl Animation {
    /// Component with no clip assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `key` from its first frame.
    ///
    /// With `ignore_if_playing`, a call for the clip that is already playing
    /// is a no-op, so controllers can call this every tick.
    pub fn play(&mut self, key: &str, ignore_if_playing: bool) {
        if ignore_if_playing && self.is_playing(key) {
            return;
        }
        self.animation_key = Some(key.to_string());
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.repeats_done = 0;
        self.playing = true;
    }

    /// Freeze on the current frame.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Whether `key` is assigned and advancing.
    pub fn is_playing(&self, key: &str) -> bool {
        self.playing && self.animation_key.as_deref() == Some(key)
    }

    pub fn current_key(&self) -> Option<&str> {
        self.animation_key.as_deref()
    }
}
