//! Scene configuration resource.
//!
//! Each scene starts from its own defaults (see
//! [`SceneKind::config`](crate::scenes::SceneKind::config)); an optional INI
//! file can then override any value before the window opens. Once the scene
//! is running the configuration is read-only.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! title = Tile scene
//! target_fps = 60
//! vsync = true
//!
//! [render]
//! pixel_art = true
//!
//! [physics]
//! gravity_x = 0
//! gravity_y = 0
//!
//! [camera]
//! speed = 500
//! zoom_speed = 0.6
//! min_zoom = 0.1
//! max_zoom = 10
//!
//! [player]
//! speed = 175
//!
//! [assets]
//! root = ./assets
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use raylib::prelude::Vector2;

/// Default safe values for startup
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;
const DEFAULT_TITLE: &str = "game-container";
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_PIXEL_ART: bool = true;
const DEFAULT_CAMERA_SPEED: f32 = 500.0;
const DEFAULT_ZOOM_SPEED: f32 = 0.6;
const DEFAULT_MIN_ZOOM: f32 = 0.1;
const DEFAULT_MAX_ZOOM: f32 = 10.0;
const DEFAULT_PLAYER_SPEED: f32 = 175.0;
const DEFAULT_ASSET_ROOT: &str = "./assets";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Settings of the arcade physics world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcadePhysics {
    /// Acceleration applied to every body, in pixels per second squared.
    pub gravity: Vector2,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self {
            gravity: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

/// Keyboard camera tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Pan speed in world pixels per second.
    pub speed: f32,
    /// Zoom change per second while a zoom key is held.
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_CAMERA_SPEED,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Scene configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Window title; identifies the host container of the canvas.
    pub title: String,
    /// Nearest-neighbour texture filtering.
    pub pixel_art: bool,
    /// Arcade physics world, if the scene uses one.
    pub physics: Option<ArcadePhysics>,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    pub camera: CameraSettings,
    /// Player walking speed in pixels per second.
    pub player_speed: f32,
    /// Directory asset paths are resolved against.
    pub asset_root: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            pixel_art: DEFAULT_PIXEL_ART,
            physics: None,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            camera: CameraSettings::default(),
            player_speed: DEFAULT_PLAYER_SPEED,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_physics(mut self, physics: ArcadePhysics) -> Self {
        self.physics = Some(physics);
        self
    }

    /// Use a custom config file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Resolve `relative` against the asset root.
    pub fn asset_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_root.join(relative)
    }

    /// Load overrides from the INI file.
    ///
    /// Missing values retain their current values. Physics keys only apply
    /// to scenes that already have a physics world.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let float = |section: &str, key: &str| -> Option<f32> {
            config.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.height = height as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [render] section
        if let Some(pixel_art) = config.getbool("render", "pixel_art").ok().flatten() {
            self.pixel_art = pixel_art;
        }

        // [physics] section
        if let Some(physics) = self.physics.as_mut() {
            if let Some(x) = float("physics", "gravity_x") {
                physics.gravity.x = x;
            }
            if let Some(y) = float("physics", "gravity_y") {
                physics.gravity.y = y;
            }
        }

        // [camera] section
        if let Some(speed) = float("camera", "speed") {
            self.camera.speed = speed;
        }
        if let Some(zoom_speed) = float("camera", "zoom_speed") {
            self.camera.zoom_speed = zoom_speed;
        }
        if let Some(min_zoom) = float("camera", "min_zoom") {
            self.camera.min_zoom = min_zoom;
        }
        if let Some(max_zoom) = float("camera", "max_zoom") {
            self.camera.max_zoom = max_zoom;
        }

        // [player] section
        if let Some(speed) = float("player", "speed") {
            self.player_speed = speed;
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }

        info!(
            "Loaded config: {}x{} '{}', fps={}, vsync={}, pixel_art={}, physics={:?}",
            self.width,
            self.height,
            self.title,
            self.target_fps,
            self.vsync,
            self.pixel_art,
            self.physics
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.width.to_string()));
        config.set("window", "height", Some(self.height.to_string()));
        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("render", "pixel_art", Some(self.pixel_art.to_string()));

        if let Some(physics) = self.physics {
            config.set("physics", "gravity_x", Some(physics.gravity.x.to_string()));
            config.set("physics", "gravity_y", Some(physics.gravity.y.to_string()));
        }

        config.set("camera", "speed", Some(self.camera.speed.to_string()));
        config.set("camera", "zoom_speed", Some(self.camera.zoom_speed.to_string()));
        config.set("camera", "min_zoom", Some(self.camera.min_zoom.to_string()));
        config.set("camera", "max_zoom", Some(self.camera.max_zoom.to_string()));

        config.set("player", "speed", Some(self.player_speed.to_string()));

        config.set(
            "assets",
            "root",
            Some(self.asset_root.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
