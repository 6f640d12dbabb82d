//! Arcade physics scene.
//!
//! An 800x600 view of the same map with a player spawned at the map's
//! `Spawn Point` object. The arrow keys walk the player, who cannot enter
//! tiles flagged `collides`; the camera follows the player and `A`/`E` zoom.
//! `D` toggles the collision debug overlay.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use log::{info, warn};
use raylib::prelude::Vector2;
use serde_json::Value;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::cameratarget::CameraTarget;
use crate::components::mapposition::MapPosition;
use crate::components::player::{DirectionalClips, PlayerController};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::tilecollider::TileCollider;
use crate::components::zindex::ZIndex;
use crate::error::SceneError;
use crate::events::switchdebug::switch_debug_observer;
use crate::events::tilecollision::observe_tile_collision;
use crate::resources::animationstore::{AnimationClip, AnimationStore, Repeat};
use crate::resources::atlas::AtlasStore;
use crate::resources::cameracontrols::CameraControls;
use crate::resources::collisionlayer::CollisionLayers;
use crate::resources::sceneconfig::{ArcadePhysics, SceneConfig};
use crate::resources::tilemapstore::TilemapStore;
use crate::scenes::preload::AssetManifest;
use crate::scenes::{
    MAP_KEY, TILES_KEY, TILESET_NAME, WORLD_LAYER, setup_camera, spawn_tile_layer,
};
use crate::systems::animation::animation;
use crate::systems::arcadephysics::arcade_physics;
use crate::systems::camera::{camera_follow, clamp_camera};
use crate::systems::cameracontrols::camera_controls;
use crate::systems::input::update_input_state;
use crate::systems::playercontroller::player_controller;
use crate::systems::render::render_system;

pub const ATLAS_KEY: &str = "atlas";
pub const OBJECT_LAYER: &str = "Objects";
pub const SPAWN_POINT: &str = "Spawn Point";
/// Prefix of the player's clip and frame names.
pub const PLAYER_ANIM: &str = "agv";
/// Player body size and its offset from the frame's top-left corner.
const BODY_SIZE: Vector2 = Vector2 { x: 30.0, y: 40.0 };
const BODY_OFFSET: Vector2 = Vector2 { x: 0.0, y: 24.0 };
const WALK_FPS: f32 = 10.0;
const PLAYER_Z: i32 = 10;

pub fn config() -> SceneConfig {
    SceneConfig::new()
        .with_size(800, 600)
        .with_physics(ArcadePhysics::default())
}

pub fn manifest() -> AssetManifest {
    AssetManifest::new()
        .image(TILES_KEY, "tilesets/map-tileset.png")
        .tilemap_tiled_json(MAP_KEY, "tilemaps/map3.json")
        .atlas(ATLAS_KEY, "atlas/agv.png", "atlas/agv.json")
}

/// Register the four looping walk clips `agv-left`..`agv-down`.
fn register_walk_clips(world: &mut World) {
    let clips: Vec<(String, AnimationClip)> = ["left", "right", "up", "down"]
        .iter()
        .map(|dir| {
            let clip = AnimationClip::from_frame_range(
                ATLAS_KEY,
                &format!("{PLAYER_ANIM}/{dir}/"),
                1,
                4,
                4,
                WALK_FPS,
                Repeat::Forever,
            );
            (format!("{PLAYER_ANIM}-{dir}"), clip)
        })
        .collect();

    let atlases = world.resource::<AtlasStore>();
    for (key, clip) in &clips {
        for frame in &clip.frames {
            if atlases.frame(ATLAS_KEY, frame).is_none() {
                warn!("Clip '{}' uses frame '{}' missing from atlas '{}'", key, frame, ATLAS_KEY);
            }
        }
    }

    let mut store = world.resource_mut::<AnimationStore>();
    for (key, clip) in clips {
        store.create(key, clip);
    }
}

pub fn create(world: &mut World) -> Result<(), SceneError> {
    spawn_tile_layer(world, WORLD_LAYER, TILESET_NAME, TILES_KEY, 0)?;

    let (collision, spawn) = {
        let map = world
            .resource::<TilemapStore>()
            .get(MAP_KEY)
            .ok_or_else(|| SceneError::MissingTilemap(MAP_KEY.to_string()))?;
        let collision = map.collision_layer(WORLD_LAYER, "collides", &Value::Bool(true))?;
        let spawn = map
            .find_object(OBJECT_LAYER, |o| o.name == SPAWN_POINT)
            .map(|o| Vector2::new(o.x, o.y))
            .ok_or_else(|| SceneError::MissingObject {
                layer: OBJECT_LAYER.to_string(),
                object: SPAWN_POINT.to_string(),
            })?;
        (collision, spawn)
    };
    info!(
        "Layer '{}' has {} colliding tiles",
        WORLD_LAYER,
        collision.solid_count()
    );
    world
        .resource_mut::<CollisionLayers>()
        .insert(WORLD_LAYER, collision);

    let clips = DirectionalClips::named(PLAYER_ANIM);
    let sprite = {
        let atlases = world.resource::<AtlasStore>();
        let atlas = atlases
            .get(ATLAS_KEY)
            .ok_or_else(|| SceneError::MissingAtlas(ATLAS_KEY.to_string()))?;
        let idle = &clips.down.idle_frame;
        let frame = atlas.frame(idle).ok_or_else(|| SceneError::MissingFrame {
            atlas: ATLAS_KEY.to_string(),
            frame: idle.clone(),
        })?;
        Sprite::from_atlas_frame(ATLAS_KEY, frame)
    };
    register_walk_clips(world);

    let (speed, camera) = {
        let config = world.resource::<SceneConfig>();
        (config.player_speed, config.camera)
    };
    let body = BoxCollider::in_frame(BODY_SIZE, BODY_OFFSET, sprite.origin);
    let player = world
        .spawn((
            MapPosition::from_vec(spawn),
            ZIndex(PLAYER_Z),
            sprite,
            body,
            RigidBody::new(),
            Animation::new(),
            PlayerController::new(speed, clips),
            TileCollider::new(WORLD_LAYER),
            CameraTarget,
        ))
        .id();
    info!("Spawned player {:?} at ({}, {})", player, spawn.x, spawn.y);

    setup_camera(
        world,
        CameraControls::zoom_only()
            .with_speed(camera.speed)
            .with_zoom(camera.zoom_speed, camera.min_zoom, camera.max_zoom),
    )?;

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(observe_tile_collision));
    world.flush();
    Ok(())
}

pub fn schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            player_controller,
            arcade_physics,
            animation,
            camera_follow,
            camera_controls,
            clamp_camera,
            render_system,
        )
            .chain(),
    );
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::atlas::Atlas;
    use crate::resources::atlas::tests::sample_atlas_json;
    use crate::scenes::tests::world_with_map;

    fn world_with_assets() -> World {
        let mut world = world_with_map(config());
        let mut atlases = AtlasStore::new();
        atlases.insert(ATLAS_KEY, Atlas::from_json(&sample_atlas_json()).unwrap());
        world.insert_resource(atlases);
        world
    }

    #[test]
    fn test_create_spawns_player_at_spawn_point() {
        let mut world = world_with_assets();
        create(&mut world).unwrap();

        let mut players = world.query_filtered::<(&MapPosition, &BoxCollider, &Sprite), With<PlayerController>>();
        let (position, body, sprite) = players.single(&world).unwrap();
        assert_eq!(position.pos, Vector2::new(48.0, 40.0));
        assert_eq!(body.size, BODY_SIZE);
        // 32x64 frame centred on the pivot: body top-left at (-16, -8)
        assert_eq!(body.offset, Vector2::new(-16.0, -8.0));
        assert_eq!(sprite.tex_key, ATLAS_KEY);

        assert!(world.resource::<CollisionLayers>().get(WORLD_LAYER).is_some());
        let store = world.resource::<AnimationStore>();
        for key in ["agv-left", "agv-right", "agv-up", "agv-down"] {
            assert_eq!(store.get(key).unwrap().frames.len(), 4);
        }
        assert!(!world.resource::<CameraControls>().pan);
    }

    #[test]
    fn test_missing_atlas() {
        let mut world = world_with_map(config());
        world.insert_resource(AtlasStore::new());
        assert!(matches!(create(&mut world), Err(SceneError::MissingAtlas(_))));
    }

    #[test]
    fn test_config_has_zero_gravity() {
        let config = config();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.physics.unwrap().gravity, Vector2::zero());
    }
}
