//! Tile collision notifications.
//!
//! The arcade physics step triggers a [`TileCollisionEvent`] every time it
//! pushes a body out of a solid tile. [`observe_tile_collision`] only traces
//! them; scenes that need gameplay reactions register their own observers.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::trace;

/// Side of the body that hit the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Event fired when a body is separated from a solid tile.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TileCollisionEvent {
    pub entity: Entity,
    /// Collision layer the tile belongs to.
    pub layer: String,
    pub tile_x: u32,
    pub tile_y: u32,
    pub side: CollisionSide,
}

pub fn observe_tile_collision(trigger: On<TileCollisionEvent>) {
    let event = trigger.event();
    trace!(
        "{:?} blocked on its {:?} side by tile ({}, {}) of '{}'",
        event.entity, event.side, event.tile_x, event.tile_y, event.layer
    );
}
