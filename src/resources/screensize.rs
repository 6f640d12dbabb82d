//! Screen size resource.
//!
//! Stores the canvas dimensions in pixels. The camera uses them to place its
//! pivot at the screen centre and to work out how much of the world is
//! visible at the current zoom.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn as_vec(&self) -> Vector2 {
        Vector2::new(self.w as f32, self.h as f32)
    }

    pub fn center(&self) -> Vector2 {
        self.as_vec() * 0.5
    }
}
