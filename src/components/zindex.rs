//! Z-index component for render ordering.
//!
//! Tile layers sit at 0 and the player above them. Sprites with equal values
//! draw in no particular order.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing. Higher values draw on top.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
