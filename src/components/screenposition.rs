//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores an entity's position in screen
//! (pixel) coordinates. Entities carrying it ignore the camera, so overlays
//! such as the help text stay in place while the view pans and zooms.
//!
//! For world-space entities, see
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Top-left corner of a screen-fixed element, in screen pixels.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ScreenPosition {
    pub pos: Vector2,
}

impl Default for ScreenPosition {
    fn default() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

impl ScreenPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_from_vec_agree() {
        let a = ScreenPosition::new(16.0, 16.0);
        let b = ScreenPosition::from_vec(Vector2 { x: 16.0, y: 16.0 });
        assert_eq!(a, b);
        assert_eq!(ScreenPosition::default().pos.x, 0.0);
    }
}
