//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that the collision overlay
//! and on-screen diagnostics should be drawn. Remove it to disable them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws debug overlays.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
