//! Animation resource registry.
//!
//! A process-wide table of named clips. Each clip is an ordered list of atlas
//! frame names with a playback rate; any sprite drawn from that atlas can play
//! it through its [`Animation`](crate::components::animation::Animation)
//! component.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::atlas::generate_frame_names;

/// How many times a clip plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Loop until stopped.
    #[default]
    Forever,
    /// Play once, then repeat `n` more times and stop on the last frame.
    Times(u32),
}

/// Immutable description of a frame-by-frame clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Atlas (and texture) key the frame names refer to.
    pub atlas_key: Arc<str>,
    /// Ordered atlas frame names.
    pub frames: Vec<String>,
    /// Frames per second.
    pub fps: f32,
    pub repeat: Repeat,
}

impl AnimationClip {
    pub fn new(atlas_key: &str, frames: Vec<String>, fps: f32, repeat: Repeat) -> Self {
        Self {
            atlas_key: atlas_key.into(),
            frames,
            fps,
            repeat,
        }
    }

    /// Clip over `prefix{start..=end}` frame names, zero padded.
    pub fn from_frame_range(
        atlas_key: &str,
        prefix: &str,
        start: u32,
        end: u32,
        zero_pad: usize,
        fps: f32,
        repeat: Repeat,
    ) -> Self {
        Self::new(
            atlas_key,
            generate_frame_names(prefix, start, end, zero_pad, ""),
            fps,
            repeat,
        )
    }

    /// Seconds each frame stays on screen.
    pub fn frame_duration(&self) -> f32 {
        if self.fps > 0.0 { 1.0 / self.fps } else { f32::INFINITY }
    }
}

/// Central registry of reusable clips keyed by name.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationClip>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `clip` under `key`, replacing any previous clip.
    pub fn create(&mut self, key: impl Into<String>, clip: AnimationClip) {
        self.animations.insert(key.into(), clip);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&AnimationClip> {
        self.animations.get(key.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_range() {
        let clip = AnimationClip::from_frame_range("atlas", "agv/up/", 1, 4, 4, 10.0, Repeat::Forever);
        assert_eq!(&*clip.atlas_key, "atlas");
        assert_eq!(clip.frames.len(), 4);
        assert_eq!(clip.frames[3], "agv/up/0004");
        assert!((clip.frame_duration() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_fps_never_advances() {
        let clip = AnimationClip::new("atlas", vec!["a".into()], 0.0, Repeat::Times(0));
        assert!(clip.frame_duration().is_infinite());
    }

    #[test]
    fn test_store_create_replaces() {
        let mut store = AnimationStore::new();
        store.create("agv-up", AnimationClip::new("atlas", vec!["a".into()], 10.0, Repeat::Forever));
        store.create("agv-up", AnimationClip::new("atlas", vec!["b".into()], 5.0, Repeat::Forever));
        assert_eq!(store.animations.len(), 1);
        assert_eq!(store.get("agv-up").unwrap().frames[0], "b");
        assert!(store.get("agv-down").is_none());
    }
}
