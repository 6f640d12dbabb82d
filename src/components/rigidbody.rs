//! Kinematic body moved by the arcade physics step.
//!
//! Controllers write [`RigidBody::velocity`]; the
//! [`arcade_physics`](crate::systems::arcadephysics::arcade_physics) system
//! integrates it, separates the body from solid tiles and records which sides
//! were blocked during the last step.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Sides of a body that touched a solid tile during the last physics step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
    /// Multiplier of the world gravity; 0 ignores it.
    pub gravity_scale: f32,
    pub blocked: Blocked,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity that feels world gravity.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            gravity_scale: 1.0,
            blocked: Blocked::default(),
        }
    }
}
