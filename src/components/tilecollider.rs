//! Collision against tile layers.
//!
//! Bodies with a [`TileCollider`] are separated from the solid cells of the
//! named [`CollisionLayers`](crate::resources::collisionlayer::CollisionLayers)
//! by the arcade physics step.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct TileCollider {
    /// Names of the collision layers this body cannot enter.
    pub layers: Vec<String>,
}

impl TileCollider {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layers: vec![layer.into()],
        }
    }
}
