//! Player-controlled walker.
//!
//! [`PlayerController`] carries the walking speed and, for each of the four
//! directions, the clip played while walking that way and the atlas frame
//! shown when stopping after it.

use bevy_ecs::prelude::Component;

/// One of the four walking directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
    Up,
    Down,
}

/// Walk clip and idle frame for one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionalClip {
    /// Key in the animation store.
    pub walk: String,
    /// Atlas frame shown when standing still facing this way.
    pub idle_frame: String,
}

/// Clips for the four directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionalClips {
    pub left: DirectionalClip,
    pub right: DirectionalClip,
    pub up: DirectionalClip,
    pub down: DirectionalClip,
}

impl DirectionalClips {
    /// Clips named `{name}-{dir}` with idle frames `{name}/{dir}/0001`.
    pub fn named(name: &str) -> Self {
        let clip = |dir: &str| DirectionalClip {
            walk: format!("{name}-{dir}"),
            idle_frame: format!("{name}/{dir}/0001"),
        };
        Self {
            left: clip("left"),
            right: clip("right"),
            up: clip("up"),
            down: clip("down"),
        }
    }

    pub fn get(&self, facing: Facing) -> &DirectionalClip {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
            Facing::Up => &self.up,
            Facing::Down => &self.down,
        }
    }
}

/// Marks the entity steered by the direction keys.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    /// Walking speed in pixels per second, also on diagonals.
    pub speed: f32,
    pub clips: DirectionalClips,
}

impl PlayerController {
    pub fn new(speed: f32, clips: DirectionalClips) -> Self {
        Self { speed, clips }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_clips() {
        let clips = DirectionalClips::named("agv");
        assert_eq!(clips.get(Facing::Left).walk, "agv-left");
        assert_eq!(clips.get(Facing::Down).idle_frame, "agv/down/0001");
        assert_eq!(clips.get(Facing::Up).walk, "agv-up");
        assert_eq!(clips.get(Facing::Right).idle_frame, "agv/right/0001");
    }
}
