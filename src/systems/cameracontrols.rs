//! Keyboard camera system.
//!
//! Thin wrapper that feeds the held keys and the tick's delta into
//! [`CameraControls::advance`].
use bevy_ecs::prelude::*;

use crate::resources::camera2d::Camera2DRes;
use crate::resources::cameracontrols::{CameraControls, CameraKeys};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

pub fn camera_controls(
    controls: Res<CameraControls>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    mut camera: ResMut<Camera2DRes>,
) {
    controls.advance(&mut camera.0, CameraKeys::from_input(&input), time.delta);
}
