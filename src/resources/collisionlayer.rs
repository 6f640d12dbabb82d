//! Solid-tile grids used by the arcade physics step.
//!
//! A [`CollisionLayer`] is built from a tile layer with
//! [`TileMap::collision_layer`](crate::resources::tilemap::TileMap::collision_layer)
//! and registered in [`CollisionLayers`] under the layer's name. Bodies carrying a
//! [`TileCollider`](crate::components::tilecollider::TileCollider) are separated
//! against the layers it names.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Rectangle, Vector2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Edges of a solid tile that border a non-solid neighbour (or the map edge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileFaces {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl TileFaces {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Per-tile solid flags for one tile layer.
#[derive(Debug, Clone)]
pub struct CollisionLayer {
    width: u32,
    height: u32,
    tile_width: f32,
    tile_height: f32,
    origin: Vector2,
    solid: Vec<bool>,
}

impl CollisionLayer {
    /// An empty (nothing solid) grid of `width` x `height` tiles.
    pub fn new(width: u32, height: u32, tile_width: f32, tile_height: f32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            origin: Vector2::zero(),
            solid: vec![false; (width * height) as usize],
        }
    }

    /// Place the grid's top-left corner at `origin` in world space.
    pub fn with_origin(mut self, origin: Vector2) -> Self {
        self.origin = origin;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> Vector2 {
        Vector2::new(self.tile_width, self.tile_height)
    }

    pub fn set_solid(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.solid[(y * self.width + x) as usize] = solid;
        }
    }

    /// Out-of-range coordinates are never solid.
    pub fn is_solid(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.solid[(y * self.width + x) as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }

    pub fn iter_solid(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1);
        self.solid
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(move |(i, _)| (i as u32 % width, i as u32 / width))
    }

    /// World-space rectangle covered by tile (`x`, `y`).
    pub fn tile_rect(&self, x: u32, y: u32) -> Rectangle {
        Rectangle {
            x: self.origin.x + x as f32 * self.tile_width,
            y: self.origin.y + y as f32 * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    /// Exposed edges of tile (`x`, `y`). Non-solid tiles have none.
    pub fn faces(&self, x: u32, y: u32) -> TileFaces {
        if !self.is_solid(x, y) {
            return TileFaces::default();
        }
        TileFaces {
            left: x == 0 || !self.is_solid(x - 1, y),
            right: !self.is_solid(x + 1, y),
            top: y == 0 || !self.is_solid(x, y - 1),
            bottom: !self.is_solid(x, y + 1),
        }
    }

    /// Solid tiles whose area strictly overlaps the box `min`..`max`.
    pub fn overlapping(&self, min: Vector2, max: Vector2) -> SmallVec<[(u32, u32); 8]> {
        let mut hits = SmallVec::new();
        if self.tile_width <= 0.0 || self.tile_height <= 0.0 {
            return hits;
        }
        let span = |lo: f32, hi: f32, origin: f32, size: f32, count: u32| {
            let first = ((lo - origin) / size).floor() as i64;
            let last = ((hi - origin) / size).ceil() as i64 - 1;
            (first.max(0), last.min(count as i64 - 1))
        };
        let (x0, x1) = span(min.x, max.x, self.origin.x, self.tile_width, self.width);
        let (y0, y1) = span(min.y, max.y, self.origin.y, self.tile_height, self.height);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.is_solid(x as u32, y as u32) {
                    hits.push((x as u32, y as u32));
                }
            }
        }
        hits
    }
}

/// Collision grids keyed by tile layer name.
#[derive(Resource, Debug, Default)]
pub struct CollisionLayers {
    pub layers: FxHashMap<String, CollisionLayer>,
}

impl CollisionLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&CollisionLayer> {
        self.layers.get(key.as_ref())
    }

    pub fn insert(&mut self, key: impl Into<String>, layer: CollisionLayer) {
        self.layers.insert(key.into(), layer);
    }
}
