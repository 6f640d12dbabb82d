//! Marker for the entity the main camera follows.
//!
//! The [`camera_follow`](crate::systems::camera::camera_follow) system centers
//! the camera on the center of this entity's body, or on its position when it
//! has no [`BoxCollider`](super::boxcollider::BoxCollider).

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraTarget;
