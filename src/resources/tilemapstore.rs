//! Registry of loaded tilemaps.
//!
//! Filled by the asset loader from the scene's manifest, read by scene
//! builders when they instantiate layers and collision grids.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::tilemap::TileMap;

/// Registry of loaded tilemaps by key.
#[derive(Resource, Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<String, TileMap>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
    /// Get a tilemap by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&TileMap> {
        self.map.get(key.as_ref())
    }
    /// Insert a tilemap with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, tilemap: TileMap) {
        self.map.insert(key.into(), tilemap);
    }
}
