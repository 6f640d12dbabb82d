//! The two demo scenes.
//!
//! A scene is driven in three steps by `main`:
//!
//! 1. [`preload`](preload::preload) loads the files of [`SceneKind::manifest`]
//! 2. [`SceneKind::create`] spawns the map, the camera setup and (physics
//!    scene only) the player
//! 3. [`SceneKind::schedule`] runs once per frame until the window closes
//!
//! Submodules overview
//! - [`preload`] – asset manifests and loading into the keyed stores
//! - [`tiled`] – large map explored with a keyboard-driven camera
//! - [`physics`] – walking player colliding with the map, followed by the camera
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use clap::ValueEnum;
use log::info;
use raylib::prelude::{Color, Vector2};

use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::error::SceneError;
use crate::resources::animationstore::AnimationStore;
use crate::resources::camera2d::{Camera2DRes, CameraBounds};
use crate::resources::cameracontrols::CameraControls;
use crate::resources::collisionlayer::CollisionLayers;
use crate::resources::input::InputState;
use crate::resources::sceneconfig::SceneConfig;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemapstore::TilemapStore;
use crate::resources::worldtime::WorldTime;

pub mod physics;
pub mod preload;
pub mod tiled;

pub use preload::AssetManifest;

/// Key of the tileset image in the texture store.
pub const TILES_KEY: &str = "tiles";
/// Key of the Tiled map in the tilemap store.
pub const MAP_KEY: &str = "map";
/// Name of the tileset inside the map.
pub const TILESET_NAME: &str = "map-tileset";
/// Tile layer both scenes render.
pub const WORLD_LAYER: &str = "World";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Map exploration with keyboard camera.
    Tiled,
    /// Player walking on the map with arcade physics.
    Physics,
}

impl SceneKind {
    /// Default configuration of the scene, before any config file applies.
    pub fn config(self) -> SceneConfig {
        match self {
            SceneKind::Tiled => tiled::config(),
            SceneKind::Physics => physics::config(),
        }
    }

    pub fn manifest(self) -> AssetManifest {
        match self {
            SceneKind::Tiled => tiled::manifest(),
            SceneKind::Physics => physics::manifest(),
        }
    }

    /// Build the scene from preloaded assets.
    pub fn create(self, world: &mut World) -> Result<(), SceneError> {
        match self {
            SceneKind::Tiled => tiled::create(world),
            SceneKind::Physics => physics::create(world),
        }
    }

    /// Per-frame systems, in order, rendering included.
    pub fn schedule(self) -> Schedule {
        match self {
            SceneKind::Tiled => tiled::schedule(),
            SceneKind::Physics => physics::schedule(),
        }
    }
}

/// Insert the resources every scene relies on.
pub fn init_world(world: &mut World, config: SceneConfig) {
    let screen = ScreenSize {
        w: config.width as i32,
        h: config.height as i32,
    };
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(screen);
    world.insert_resource(Camera2DRes::for_screen(screen.as_vec()));
    world.insert_resource(AnimationStore::new());
    world.insert_resource(CollisionLayers::new());
    world.insert_resource(config);
}

/// Spawn one sprite per tile of `layer` that belongs to tileset `tileset`,
/// textured with `tex_key` and faded by the layer's opacity. A hidden layer
/// spawns nothing. Returns the number of tiles spawned.
pub fn spawn_tile_layer(
    world: &mut World,
    layer: &str,
    tileset: &str,
    tex_key: &str,
    z: i32,
) -> Result<usize, SceneError> {
    let tiles: Vec<(MapPosition, Sprite, ZIndex)> = {
        let map = world
            .resource::<TilemapStore>()
            .get(MAP_KEY)
            .ok_or_else(|| SceneError::MissingTilemap(MAP_KEY.to_string()))?;
        let tileset = map
            .tileset(tileset)
            .ok_or_else(|| SceneError::MissingTileset(tileset.to_string()))?;
        let tile_layer = map
            .layer(layer)
            .ok_or_else(|| SceneError::MissingLayer(layer.to_string()))?;
        if !tile_layer.visible {
            info!("Layer '{}' is hidden; no tiles spawned", layer);
            return Ok(0);
        }
        let alpha = (tile_layer.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        let tint = Color::new(255, 255, 255, alpha);

        // tiles taller than a map cell grow upwards from the cell's bottom
        let rise = tileset.tile_height as f32 - map.tile_height as f32;
        tile_layer
            .iter_tiles()
            .filter(|(_, _, tile)| tileset.contains(tile.gid))
            .map(|(x, y, tile)| {
                let pos = tile_layer.offset
                    + Vector2::new(
                        (x * map.tile_width) as f32,
                        (y * map.tile_height) as f32 - rise,
                    );
                let mut sprite = Sprite::from_rect(tex_key, tileset.source_rect(tile.gid));
                sprite.flip_h = tile.flip_h;
                sprite.flip_v = tile.flip_v;
                sprite.tint = tint;
                (MapPosition::from_vec(pos), sprite, ZIndex(z))
            })
            .collect()
    };

    let count = tiles.len();
    world.spawn_batch(tiles);
    info!("Spawned {} tiles of layer '{}'", count, layer);
    Ok(count)
}

/// Keep the camera inside the map and bind the keyboard controls.
pub fn setup_camera(world: &mut World, controls: CameraControls) -> Result<(), SceneError> {
    let (width, height) = {
        let map = world
            .resource::<TilemapStore>()
            .get(MAP_KEY)
            .ok_or_else(|| SceneError::MissingTilemap(MAP_KEY.to_string()))?;
        (map.width_in_pixels() as f32, map.height_in_pixels() as f32)
    };
    let screen = world.resource::<ScreenSize>().as_vec();
    world.insert_resource(Camera2DRes::for_screen(screen));
    world.insert_resource(CameraBounds::new(0.0, 0.0, width, height));
    world.insert_resource(controls);
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::resources::tilemap::TileMap;
    use crate::resources::tilemap::tests::SAMPLE_MAP;

    /// World with the sample map loaded under the scenes' map key.
    pub(crate) fn world_with_map(config: SceneConfig) -> World {
        let mut world = World::new();
        init_world(&mut world, config);
        let mut tilemaps = TilemapStore::new();
        tilemaps.insert(MAP_KEY, TileMap::from_json(SAMPLE_MAP).unwrap());
        world.insert_resource(tilemaps);
        world
    }

    #[test]
    fn test_spawn_tile_layer_only_uses_bound_tileset() {
        let mut world = world_with_map(SceneConfig::new());
        // 11 non-empty cells, one of them from the "props" tileset
        let count = spawn_tile_layer(&mut world, WORLD_LAYER, TILESET_NAME, TILES_KEY, 0).unwrap();
        assert_eq!(count, 10);

        let mut query = world.query::<(&MapPosition, &Sprite)>();
        let flipped: Vec<_> = query.iter(&world).filter(|(_, s)| s.flip_h).collect();
        assert_eq!(flipped.len(), 1);
        assert_eq!(flipped[0].0.pos, Vector2::new(64.0, 64.0));
        assert!(query.iter(&world).all(|(_, s)| s.tex_key == TILES_KEY));
    }

    fn world_with_layer_style(style: &str) -> World {
        let mut world = World::new();
        init_world(&mut world, SceneConfig::new());
        let json = SAMPLE_MAP.replacen(r#""visible": true, "opacity": 1"#, style, 1);
        let mut tilemaps = TilemapStore::new();
        tilemaps.insert(MAP_KEY, TileMap::from_json(&json).unwrap());
        world.insert_resource(tilemaps);
        world
    }

    #[test]
    fn test_hidden_layer_spawns_nothing() {
        let mut world = world_with_layer_style(r#""visible": false, "opacity": 1"#);
        let count = spawn_tile_layer(&mut world, WORLD_LAYER, TILESET_NAME, TILES_KEY, 0).unwrap();
        assert_eq!(count, 0);
        assert_eq!(world.query::<&Sprite>().iter(&world).count(), 0);
    }

    #[test]
    fn test_layer_opacity_tints_tiles() {
        let mut world = world_with_layer_style(r#""visible": true, "opacity": 0.5"#);
        spawn_tile_layer(&mut world, WORLD_LAYER, TILESET_NAME, TILES_KEY, 0).unwrap();
        let mut query = world.query::<&Sprite>();
        assert!(query.iter(&world).all(|s| s.tint == Color::new(255, 255, 255, 128)));

        let mut world = world_with_map(SceneConfig::new());
        spawn_tile_layer(&mut world, WORLD_LAYER, TILESET_NAME, TILES_KEY, 0).unwrap();
        let mut query = world.query::<&Sprite>();
        assert!(query.iter(&world).all(|s| s.tint == Color::WHITE));
    }

    #[test]
    fn test_spawn_tile_layer_errors() {
        let mut world = world_with_map(SceneConfig::new());
        assert!(matches!(
            spawn_tile_layer(&mut world, "Ground", TILESET_NAME, TILES_KEY, 0),
            Err(SceneError::MissingLayer(_))
        ));
        assert!(matches!(
            spawn_tile_layer(&mut world, WORLD_LAYER, "nope", TILES_KEY, 0),
            Err(SceneError::MissingTileset(_))
        ));
    }

    #[test]
    fn test_missing_map_is_an_error() {
        let mut world = World::new();
        init_world(&mut world, SceneConfig::new());
        world.insert_resource(TilemapStore::new());
        assert!(matches!(
            setup_camera(&mut world, CameraControls::default()),
            Err(SceneError::MissingTilemap(_))
        ));
    }

    #[test]
    fn test_setup_camera_bounds_cover_map() {
        let mut world = world_with_map(SceneConfig::new());
        setup_camera(&mut world, CameraControls::zoom_only()).unwrap();
        let bounds = world.resource::<CameraBounds>();
        assert_eq!((bounds.0.width, bounds.0.height), (128.0, 96.0));
        assert!(!world.resource::<CameraControls>().pan);
    }
}
