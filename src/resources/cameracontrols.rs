//! Keyboard camera controls.
//!
//! [`CameraControls`] pans the camera along held direction keys and zooms
//! while the zoom keys are held. The direction keys are optional: a scene
//! whose camera follows the player only binds the zoom pair.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Camera2D;

use crate::resources::input::InputState;

/// Held state of the keys the controls read, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl CameraKeys {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.direction_left.active,
            right: input.direction_right.active,
            up: input.direction_up.active,
            down: input.direction_down.active,
            zoom_in: input.zoom_in.active,
            zoom_out: input.zoom_out.active,
        }
    }
}

/// Fixed-speed keyboard control of the main camera.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraControls {
    /// Whether the direction keys pan the camera.
    pub pan: bool,
    /// Whether the zoom keys change the zoom.
    pub zoom: bool,
    /// Pan speed in world pixels per second.
    pub speed: f32,
    /// Zoom change per second while a zoom key is held.
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self {
            pan: true,
            zoom: true,
            speed: 500.0,
            zoom_speed: 0.6,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl CameraControls {
    /// Controls bound to the zoom keys only.
    pub fn zoom_only() -> Self {
        Self {
            pan: false,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_zoom(mut self, zoom_speed: f32, min_zoom: f32, max_zoom: f32) -> Self {
        self.zoom_speed = zoom_speed;
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom.max(min_zoom);
        self
    }

    /// Move and zoom `camera` for a tick of `dt` seconds.
    ///
    /// Up wins over down and left over right. Pan steps are truncated to
    /// whole pixels. The zoom-in key lowers the zoom value and wins over
    /// zoom-out, which raises it.
    pub fn advance(&self, camera: &mut Camera2D, keys: CameraKeys, dt: f32) {
        if self.pan {
            let step = (self.speed * dt).trunc();
            if keys.up {
                camera.target.y -= step;
            } else if keys.down {
                camera.target.y += step;
            }
            if keys.left {
                camera.target.x -= step;
            } else if keys.right {
                camera.target.x += step;
            }
        }

        if self.zoom {
            let step = self.zoom_speed * dt;
            if keys.zoom_in {
                camera.zoom = (camera.zoom - step).max(self.min_zoom);
            } else if keys.zoom_out {
                camera.zoom = (camera.zoom + step).min(self.max_zoom);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    const EPSILON: f32 = 1e-5;

    fn camera() -> Camera2D {
        Camera2D {
            target: Vector2 { x: 100.0, y: 100.0 },
            offset: Vector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
            zoom: 1.0,
        }
    }

    #[test]
    fn test_pan_right_and_down() {
        let controls = CameraControls::default().with_speed(500.0);
        let mut cam = camera();
        let keys = CameraKeys {
            right: true,
            down: true,
            ..Default::default()
        };
        controls.advance(&mut cam, keys, 0.1);
        assert!((cam.target.x - 150.0).abs() < EPSILON);
        assert!((cam.target.y - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_opposite_keys_prefer_up_and_left() {
        let controls = CameraControls::default().with_speed(100.0);
        let mut cam = camera();
        let keys = CameraKeys {
            left: true,
            right: true,
            up: true,
            down: true,
            ..Default::default()
        };
        controls.advance(&mut cam, keys, 1.0);
        assert!((cam.target.x - 0.0).abs() < EPSILON);
        assert!((cam.target.y - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_only_ignores_direction_keys() {
        let controls = CameraControls::zoom_only();
        let mut cam = camera();
        let keys = CameraKeys {
            left: true,
            zoom_in: true,
            ..Default::default()
        };
        controls.advance(&mut cam, keys, 0.5);
        assert!((cam.target.x - 100.0).abs() < EPSILON);
        assert!((cam.zoom - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let controls = CameraControls::default().with_zoom(10.0, 0.5, 2.0);
        let mut cam = camera();
        controls.advance(
            &mut cam,
            CameraKeys {
                zoom_in: true,
                ..Default::default()
            },
            1.0,
        );
        assert!((cam.zoom - 0.5).abs() < EPSILON);
        controls.advance(
            &mut cam,
            CameraKeys {
                zoom_out: true,
                ..Default::default()
            },
            1.0,
        );
        assert!((cam.zoom - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_both_zoom_keys_zoom_in() {
        let controls = CameraControls::default();
        let mut cam = camera();
        let keys = CameraKeys {
            zoom_in: true,
            zoom_out: true,
            ..Default::default()
        };
        controls.advance(&mut cam, keys, 0.5);
        assert!((cam.zoom - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_pan_step_is_whole_pixels() {
        let controls = CameraControls::default();
        let mut cam = camera();
        let keys = CameraKeys {
            right: true,
            up: true,
            ..Default::default()
        };
        // 500 px/s over a 60 fps frame is 8.33 px
        controls.advance(&mut cam, keys, 1.0 / 60.0);
        assert_eq!(cam.target.x, 108.0);
        assert_eq!(cam.target.y, 92.0);
    }

    #[test]
    fn test_keys_from_input() {
        let mut input = InputState::default();
        input.direction_up.active = true;
        input.zoom_out.active = true;
        let keys = CameraKeys::from_input(&input);
        assert!(keys.up && keys.zoom_out);
        assert!(!keys.down && !keys.left && !keys.right && !keys.zoom_in);
    }
}
