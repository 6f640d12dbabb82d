//! Shared 2D camera resources.
//!
//! [`Camera2DRes`] wraps raylib's [`Camera2D`] so that systems agree on a
//! single world/screen transform. The camera's `offset` is the screen centre
//! and its `target` is the world point shown there, so zoom scales around the
//! middle of the view. [`CameraBounds`] keeps that view inside the map.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Rectangle, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera for a `screen`-sized canvas whose top-left shows world (0, 0).
    pub fn for_screen(screen: Vector2) -> Self {
        let center = screen * 0.5;
        Camera2DRes(Camera2D {
            target: center,
            offset: center,
            rotation: 0.0,
            zoom: 1.0,
        })
    }

    /// World rectangle visible through a `screen`-sized canvas.
    pub fn view_rect(&self, screen: Vector2) -> Rectangle {
        let cam = self.0;
        let zoom = if cam.zoom > 0.0 { cam.zoom } else { 1.0 };
        let w = screen.x / zoom;
        let h = screen.y / zoom;
        Rectangle {
            x: cam.target.x - w * 0.5,
            y: cam.target.y - h * 0.5,
            width: w,
            height: h,
        }
    }
}

/// World-space rectangle the camera view may not leave.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraBounds(pub Rectangle);

impl CameraBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        CameraBounds(Rectangle {
            x,
            y,
            width,
            height,
        })
    }

    /// Clamp a view `center` so the view stays inside the bounds.
    ///
    /// `screen` is the canvas size in pixels; the world area shown is
    /// `screen / zoom`. On an axis where the view is larger than the bounds,
    /// the view's near edge is pinned to the bounds' origin.
    pub fn clamp(&self, center: Vector2, screen: Vector2, zoom: f32) -> Vector2 {
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };
        let b = self.0;
        let clamp_axis = |c: f32, origin: f32, extent: f32, view: f32| {
            let min = origin + view * 0.5;
            let max = (origin + extent - view * 0.5).max(min);
            c.clamp(min, max)
        };
        Vector2 {
            x: clamp_axis(center.x, b.x, b.width, screen.x / zoom),
            y: clamp_axis(center.y, b.y, b.height, screen.y / zoom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vector2 = Vector2 { x: 800.0, y: 600.0 };

    #[test]
    fn test_for_screen_shows_origin() {
        let cam = Camera2DRes::for_screen(SCREEN);
        let view = cam.view_rect(SCREEN);
        assert_eq!((view.x, view.y, view.width, view.height), (0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_view_rect_with_zoom() {
        let mut cam = Camera2DRes::for_screen(SCREEN);
        cam.0.zoom = 2.0;
        let view = cam.view_rect(SCREEN);
        assert_eq!((view.x, view.y, view.width, view.height), (200.0, 150.0, 400.0, 300.0));
    }

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let bounds = CameraBounds::new(0.0, 0.0, 2000.0, 2000.0);
        let c = bounds.clamp(Vector2::new(1000.0, 900.0), SCREEN, 1.0);
        assert_eq!((c.x, c.y), (1000.0, 900.0));
    }

    #[test]
    fn test_clamp_edges() {
        let bounds = CameraBounds::new(0.0, 0.0, 2000.0, 2000.0);
        let c = bounds.clamp(Vector2::new(-100.0, 5000.0), SCREEN, 1.0);
        assert_eq!((c.x, c.y), (400.0, 1700.0));
    }

    #[test]
    fn test_clamp_accounts_for_zoom() {
        let bounds = CameraBounds::new(0.0, 0.0, 2000.0, 2000.0);
        let c = bounds.clamp(Vector2::new(0.0, 0.0), SCREEN, 2.0);
        assert_eq!((c.x, c.y), (200.0, 150.0));
    }

    #[test]
    fn test_clamp_view_larger_than_bounds_pins_origin() {
        let bounds = CameraBounds::new(0.0, 0.0, 640.0, 480.0);
        let c = bounds.clamp(Vector2::new(320.0, 240.0), SCREEN, 1.0);
        assert_eq!((c.x, c.y), (400.0, 300.0));
    }
}
