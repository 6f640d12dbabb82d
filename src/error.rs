//! Error types for asset loading and scene construction.
//!
//! Both kinds are fatal at startup: `main` logs them and exits.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or decoding an asset declared in a manifest.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load texture {path}: {reason}")]
    Texture { path: PathBuf, reason: String },
    #[error("infinite tilemaps are not supported")]
    InfiniteMap,
    #[error("tileset with firstgid {first_gid} is external ({source_path}); embed it in the map")]
    ExternalTileset { first_gid: u32, source_path: String },
    #[error("layer '{layer}' has {actual} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },
}

/// Failure while building a scene from loaded assets.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no tilemap loaded under key '{0}'")]
    MissingTilemap(String),
    #[error("no atlas loaded under key '{0}'")]
    MissingAtlas(String),
    #[error("tilemap has no tileset named '{0}'")]
    MissingTileset(String),
    #[error("tilemap has no tile layer named '{0}'")]
    MissingLayer(String),
    #[error("object '{object}' not found in layer '{layer}'")]
    MissingObject { layer: String, object: String },
    #[error("atlas '{atlas}' has no frame '{frame}'")]
    MissingFrame { atlas: String, frame: String },
}
