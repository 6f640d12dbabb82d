//! Tiled map scene.
//!
//! Renders the `World` layer of the map on a 1600x1200 canvas. The arrow
//! keys pan the camera and `A`/`E` zoom; the view never leaves the map. A
//! help label stays in the top-left corner.
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use raylib::prelude::{Color, Vector2};

use crate::components::screenposition::ScreenPosition;
use crate::components::screentext::ScreenText;
use crate::error::SceneError;
use crate::resources::cameracontrols::CameraControls;
use crate::resources::sceneconfig::SceneConfig;
use crate::scenes::preload::AssetManifest;
use crate::scenes::{
    MAP_KEY, TILES_KEY, TILESET_NAME, WORLD_LAYER, setup_camera, spawn_tile_layer,
};
use crate::systems::camera::clamp_camera;
use crate::systems::cameracontrols::camera_controls;
use crate::systems::input::update_input_state;
use crate::systems::render::render_system;

pub const HELP_TEXT: &str = "A/E: zoom, arrows: scroll";

pub fn config() -> SceneConfig {
    SceneConfig::new().with_size(1600, 1200)
}

pub fn manifest() -> AssetManifest {
    AssetManifest::new()
        .image(TILES_KEY, "tilesets/map-tileset.png")
        .tilemap_tiled_json(MAP_KEY, "tilemaps/map3.json")
}

pub fn create(world: &mut World) -> Result<(), SceneError> {
    spawn_tile_layer(world, WORLD_LAYER, TILESET_NAME, TILES_KEY, 0)?;

    let settings = world.resource::<SceneConfig>().camera;
    setup_camera(
        world,
        CameraControls::default()
            .with_speed(settings.speed)
            .with_zoom(settings.zoom_speed, settings.min_zoom, settings.max_zoom),
    )?;

    world.spawn((
        ScreenPosition::new(16.0, 16.0),
        ScreenText::new(HELP_TEXT, 18, Color::WHITE)
            .with_background(Color::new(0x3d, 0x3d, 0x3d, 255), Vector2::new(20.0, 10.0)),
    ));
    Ok(())
}

pub fn schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((update_input_state, camera_controls, clamp_camera, render_system).chain());
    update
}
