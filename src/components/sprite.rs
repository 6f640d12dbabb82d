use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::resources::atlas::AtlasFrame;

/// Sprite is identified by a texture key and the rectangle of that texture it
/// shows. For tiles the rectangle is a tileset cell, for the player it is an
/// atlas frame that changes as animations play.
///
/// `origin` is the pivot (in pixels, relative to the untrimmed frame's
/// top-left) placed at the entity's [`MapPosition`](super::mapposition::MapPosition).
/// `trim` shifts a trimmed atlas frame back to where it sat in the untrimmed
/// image. `tint` multiplies the texture colour; its alpha carries the
/// opacity of a tile layer.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
    pub origin: Vector2,
    pub trim: Vector2,
    pub flip_h: bool,
    pub flip_v: bool,
    pub tint: Color,
}

impl Sprite {
    /// Sprite showing `source` of texture `tex_key`, pivot at its top-left.
    pub fn from_rect(tex_key: impl Into<String>, source: Rectangle) -> Self {
        Self {
            tex_key: tex_key.into(),
            width: source.width,
            height: source.height,
            offset: Vector2::new(source.x, source.y),
            origin: Vector2::zero(),
            trim: Vector2::zero(),
            flip_h: false,
            flip_v: false,
            tint: Color::WHITE,
        }
    }

    /// Sprite showing an atlas frame, pivot at the frame's centre.
    pub fn from_atlas_frame(tex_key: impl Into<String>, frame: &AtlasFrame) -> Self {
        let mut sprite = Self::from_rect(tex_key, frame.rect);
        sprite.origin = frame.source_size * 0.5;
        sprite.trim = frame.trim_offset;
        sprite
    }

    /// Show another frame of the same atlas. The pivot stays where it is.
    pub fn set_frame(&mut self, frame: &AtlasFrame) {
        self.offset = Vector2::new(frame.rect.x, frame.rect.y);
        self.width = frame.rect.width;
        self.height = frame.rect.height;
        self.trim = frame.trim_offset;
    }

    /// Rectangle to copy from the texture; negative sizes mirror.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: self.offset.x,
            y: self.offset.y,
            width: if self.flip_h { -self.width } else { self.width },
            height: if self.flip_v { -self.height } else { self.height },
        }
    }

    /// World rectangle covered when the pivot sits at `position`.
    pub fn world_rect(&self, position: Vector2) -> Rectangle {
        Rectangle {
            x: position.x - self.origin.x + self.trim.x,
            y: position.y - self.origin.y + self.trim.y,
            width: self.width,
            height: self.height,
        }
    }
}
