//! ECS resources made available to systems.
//!
//! Long-lived data injected into the ECS world: configuration, input state,
//! timing, the camera, and the keyed asset stores filled at preload.
//!
//! Overview
//! - `animationstore` – named animation clips reused across entities
//! - `atlas` – texture atlas frame maps
//! - `camera2d` – shared 2D camera and the bounds it stays in
//! - `cameracontrols` – keyboard pan and zoom settings
//! - `collisionlayer` – solid-tile grids used by the physics step
//! - `debugmode` – presence toggles the debug overlay
//! - `input` – per-frame keyboard state of keys relevant to the scenes
//! - `sceneconfig` – canvas, physics and tuning values of the running scene
//! - `screensize` – canvas dimensions in pixels
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tilemap` – Tiled map model
//! - `tilemapstore` – loaded tile maps keyed by string IDs
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod atlas;
pub mod camera2d;
pub mod cameracontrols;
pub mod collisionlayer;
pub mod debugmode;
pub mod input;
pub mod sceneconfig;
pub mod screensize;
pub mod texturestore;
pub mod tilemap;
pub mod tilemapstore;
pub mod worldtime;
