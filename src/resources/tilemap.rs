//! Tiled map data.
//!
//! Decodes maps exported by the Tiled editor as JSON (orthogonal, finite,
//! with embedded tilesets and CSV-style `data` arrays) into a [`TileMap`].
//! Only the pieces the scenes use are modelled: tile layers, object layers,
//! tilesets and their per-tile custom properties.

use raylib::prelude::{Rectangle, Vector2};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AssetError, SceneError};
use crate::resources::collisionlayer::CollisionLayer;

/// Bit set on a global tile id when the tile is mirrored horizontally.
pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
/// Bit set on a global tile id when the tile is mirrored vertically.
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
/// Bit set on a global tile id when the tile is mirrored along its diagonal.
pub const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;
const ROTATED_HEXAGONAL: u32 = 0x1000_0000;
const FLAG_MASK: u32 =
    FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY | ROTATED_HEXAGONAL;

/// Custom properties attached to a tile or object.
pub type Properties = FxHashMap<String, Value>;

// ---------------------------------------------------------------------------
// Raw Tiled JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    infinite: bool,
    #[serde(default)]
    layers: Vec<RawLayer>,
    #[serde(default)]
    tilesets: Vec<RawTileset>,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawLayer {
    Tilelayer {
        name: String,
        width: u32,
        height: u32,
        #[serde(default)]
        data: Vec<u32>,
        #[serde(default = "default_true")]
        visible: bool,
        #[serde(default = "default_opacity")]
        opacity: f32,
        #[serde(default)]
        offsetx: f32,
        #[serde(default)]
        offsety: f32,
    },
    Objectgroup {
        name: String,
        #[serde(default)]
        objects: Vec<RawObject>,
    },
    Group {
        name: String,
        #[serde(default)]
        layers: Vec<RawLayer>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default, alias = "class")]
    r#type: String,
    x: f32,
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    value: Value,
}

#[derive(Debug, Deserialize)]
struct RawTileset {
    firstgid: u32,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    tilewidth: u32,
    #[serde(default)]
    tileheight: u32,
    #[serde(default)]
    columns: u32,
    #[serde(default)]
    tilecount: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    tiles: Vec<RawTile>,
}

#[derive(Debug, Deserialize)]
struct RawTile {
    id: u32,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

fn collect_properties(raw: Vec<RawProperty>) -> Properties {
    raw.into_iter().map(|p| (p.name, p.value)).collect()
}

// ---------------------------------------------------------------------------
// Map model
// ---------------------------------------------------------------------------

/// A placed tile: global id with the flip flags split out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub gid: u32,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Tile {
    /// Decode a raw layer value. Zero means "no tile".
    pub fn from_raw(raw: u32) -> Option<Tile> {
        let gid = raw & !FLAG_MASK;
        if gid == 0 {
            return None;
        }
        Some(Tile {
            gid,
            flip_h: raw & FLIPPED_HORIZONTALLY != 0,
            flip_v: raw & FLIPPED_VERTICALLY != 0,
        })
    }
}

/// Grid of tiles, row-major.
#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub visible: bool,
    pub opacity: f32,
    /// Pixel offset set in the editor.
    pub offset: Vector2,
    pub tiles: Vec<Option<Tile>>,
}

impl TileLayer {
    /// Tile at column `x`, row `y`; `None` when empty or out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    /// Non-empty tiles with their grid coordinates.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (u32, u32, Tile)> + '_ {
        let width = self.width.max(1);
        self.tiles.iter().enumerate().filter_map(move |(i, t)| {
            t.map(|tile| (i as u32 % width, i as u32 / width, tile))
        })
    }
}

/// An object from an object layer (spawn points, regions).
#[derive(Debug, Clone)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub point: bool,
    pub properties: Properties,
}

#[derive(Debug, Clone)]
pub struct ObjectLayer {
    pub name: String,
    pub objects: Vec<MapObject>,
}

/// Tileset embedded in the map.
#[derive(Debug, Clone)]
pub struct Tileset {
    pub name: String,
    pub first_gid: u32,
    /// Image path relative to the map file.
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub tile_count: u32,
    pub margin: u32,
    pub spacing: u32,
    /// Custom properties keyed by tileset-local id.
    pub tile_properties: FxHashMap<u32, Properties>,
}

impl Tileset {
    fn from_raw(raw: RawTileset) -> Result<Self, AssetError> {
        if let Some(source) = raw.source {
            return Err(AssetError::ExternalTileset {
                first_gid: raw.firstgid,
                source_path: source,
            });
        }
        let mut tileset = Tileset {
            name: raw.name,
            first_gid: raw.firstgid,
            image: raw.image,
            image_width: raw.imagewidth,
            image_height: raw.imageheight,
            tile_width: raw.tilewidth,
            tile_height: raw.tileheight,
            columns: raw.columns,
            tile_count: raw.tilecount,
            margin: raw.margin,
            spacing: raw.spacing,
            tile_properties: raw
                .tiles
                .into_iter()
                .map(|t| (t.id, collect_properties(t.properties)))
                .collect(),
        };
        // Older exports omit columns; derive it from the image.
        if tileset.columns == 0 && tileset.tile_width > 0 {
            let usable = tileset.image_width.saturating_sub(2 * tileset.margin) + tileset.spacing;
            tileset.columns = (usable / (tileset.tile_width + tileset.spacing)).max(1);
        }
        Ok(tileset)
    }

    /// Whether `gid` belongs to this tileset.
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && (self.tile_count == 0 || gid < self.first_gid + self.tile_count)
    }

    /// Source rectangle of `gid` inside the tileset image.
    pub fn source_rect(&self, gid: u32) -> Rectangle {
        let local = gid.saturating_sub(self.first_gid);
        let columns = self.columns.max(1);
        let col = local % columns;
        let row = local / columns;
        Rectangle {
            x: (self.margin + col * (self.tile_width + self.spacing)) as f32,
            y: (self.margin + row * (self.tile_height + self.spacing)) as f32,
            width: self.tile_width as f32,
            height: self.tile_height as f32,
        }
    }

    /// Custom properties of `gid`, if any were set in the editor.
    pub fn properties(&self, gid: u32) -> Option<&Properties> {
        self.tile_properties.get(&gid.checked_sub(self.first_gid)?)
    }
}

/// A decoded Tiled map.
#[derive(Debug, Clone)]
pub struct TileMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_layers: Vec<TileLayer>,
    pub object_layers: Vec<ObjectLayer>,
    /// Sorted by `first_gid`.
    pub tilesets: Vec<Tileset>,
}

impl TileMap {
    /// Decode a Tiled JSON document.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let raw: RawMap = serde_json::from_str(json).map_err(|source| AssetError::Json {
            what: "tilemap".into(),
            source,
        })?;
        if raw.infinite {
            return Err(AssetError::InfiniteMap);
        }

        let mut map = TileMap {
            width: raw.width,
            height: raw.height,
            tile_width: raw.tilewidth,
            tile_height: raw.tileheight,
            tile_layers: Vec::new(),
            object_layers: Vec::new(),
            tilesets: raw
                .tilesets
                .into_iter()
                .map(Tileset::from_raw)
                .collect::<Result<_, _>>()?,
        };
        map.tilesets.sort_by_key(|t| t.first_gid);
        map.push_layers(raw.layers, "")?;
        Ok(map)
    }

    // Group layers are flattened, their children named "group/child".
    fn push_layers(&mut self, layers: Vec<RawLayer>, prefix: &str) -> Result<(), AssetError> {
        for layer in layers {
            match layer {
                RawLayer::Tilelayer {
                    name,
                    width,
                    height,
                    data,
                    visible,
                    opacity,
                    offsetx,
                    offsety,
                } => {
                    let expected = (width * height) as usize;
                    let name = format!("{prefix}{name}");
                    if data.len() != expected {
                        return Err(AssetError::LayerSize {
                            layer: name,
                            expected,
                            actual: data.len(),
                        });
                    }
                    self.tile_layers.push(TileLayer {
                        name,
                        width,
                        height,
                        visible,
                        opacity,
                        offset: Vector2::new(offsetx, offsety),
                        tiles: data.into_iter().map(Tile::from_raw).collect(),
                    });
                }
                RawLayer::Objectgroup { name, objects } => {
                    self.object_layers.push(ObjectLayer {
                        name: format!("{prefix}{name}"),
                        objects: objects
                            .into_iter()
                            .map(|o| MapObject {
                                id: o.id,
                                name: o.name,
                                kind: o.r#type,
                                x: o.x,
                                y: o.y,
                                width: o.width,
                                height: o.height,
                                point: o.point,
                                properties: collect_properties(o.properties),
                            })
                            .collect(),
                    });
                }
                RawLayer::Group { name, layers } => {
                    let nested = format!("{prefix}{name}/");
                    self.push_layers(layers, &nested)?;
                }
                RawLayer::Other => {}
            }
        }
        Ok(())
    }

    pub fn width_in_pixels(&self) -> u32 {
        self.width * self.tile_width
    }

    pub fn height_in_pixels(&self) -> u32 {
        self.height * self.tile_height
    }

    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.tile_layers.iter().find(|l| l.name == name)
    }

    pub fn object_layer(&self, name: &str) -> Option<&ObjectLayer> {
        self.object_layers.iter().find(|l| l.name == name)
    }

    pub fn tileset(&self, name: &str) -> Option<&Tileset> {
        self.tilesets.iter().find(|t| t.name == name)
    }

    /// The tileset a global id falls into.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&Tileset> {
        self.tilesets
            .iter()
            .rev()
            .find(|t| t.first_gid <= gid)
            .filter(|t| t.contains(gid))
    }

    /// Custom properties of the tile with global id `gid`.
    pub fn tile_properties(&self, gid: u32) -> Option<&Properties> {
        self.tileset_for_gid(gid)?.properties(gid)
    }

    /// First object in `layer` accepted by `predicate`.
    pub fn find_object<F>(&self, layer: &str, predicate: F) -> Option<&MapObject>
    where
        F: Fn(&MapObject) -> bool,
    {
        self.object_layer(layer)?
            .objects
            .iter()
            .find(|o| predicate(o))
    }

    /// Mark every tile of `layer` whose tile property `property` equals
    /// `value` as solid.
    pub fn collision_layer(
        &self,
        layer: &str,
        property: &str,
        value: &Value,
    ) -> Result<CollisionLayer, SceneError> {
        let tiles = self
            .layer(layer)
            .ok_or_else(|| SceneError::MissingLayer(layer.to_string()))?;
        let mut collision = CollisionLayer::new(
            tiles.width,
            tiles.height,
            self.tile_width as f32,
            self.tile_height as f32,
        )
        .with_origin(tiles.offset);
        for (x, y, tile) in tiles.iter_tiles() {
            let solid = self
                .tile_properties(tile.gid)
                .and_then(|p| p.get(property))
                .is_some_and(|v| v == value);
            if solid {
                collision.set_solid(x, y, true);
            }
        }
        Ok(collision)
    }
}
