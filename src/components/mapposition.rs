//! World-space position component.
//!
//! The [`MapPosition`] is the entity's pivot in world pixels. For sprites the
//! pivot is [`Sprite::origin`](super::sprite::Sprite::origin) pixels into the
//! frame; for the player that is the centre of the frame.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}
