//! Asset preloading.
//!
//! Every scene declares the files it needs in an [`AssetManifest`]. All of
//! them are loaded into their keyed stores before the scene is created, so
//! scene building only ever looks assets up.
use std::fs;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

use crate::error::AssetError;
use crate::resources::atlas::{Atlas, AtlasStore};
use crate::resources::sceneconfig::SceneConfig;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::TileMap;
use crate::resources::tilemapstore::TilemapStore;

/// A texture atlas: one image plus its frame map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasAsset {
    pub key: String,
    pub image: PathBuf,
    pub data: PathBuf,
}

/// Files a scene loads before it is created, relative to the asset root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    pub images: Vec<(String, PathBuf)>,
    pub tilemaps: Vec<(String, PathBuf)>,
    pub atlases: Vec<AtlasAsset>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.images.push((key.into(), path.into()));
        self
    }

    /// A Tiled map exported as JSON.
    pub fn tilemap_tiled_json(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.tilemaps.push((key.into(), path.into()));
        self
    }

    /// A TexturePacker atlas. The image is stored under the same key.
    pub fn atlas(
        mut self,
        key: impl Into<String>,
        image: impl Into<PathBuf>,
        data: impl Into<PathBuf>,
    ) -> Self {
        self.atlases.push(AtlasAsset {
            key: key.into(),
            image: image.into(),
            data: data.into(),
        });
        self
    }
}

fn read_text(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse every tilemap of `manifest`.
pub fn load_tilemaps(
    manifest: &AssetManifest,
    config: &SceneConfig,
) -> Result<TilemapStore, AssetError> {
    let mut store = TilemapStore::new();
    for (key, path) in &manifest.tilemaps {
        let path = config.asset_path(path);
        let map = TileMap::from_json(&read_text(&path)?)?;
        info!(
            "Loaded tilemap '{}' from {:?}: {}x{} tiles, {} layers",
            key,
            path,
            map.width,
            map.height,
            map.tile_layers.len()
        );
        store.insert(key.clone(), map);
    }
    Ok(store)
}

/// Parse the frame maps of every atlas of `manifest`.
pub fn load_atlases(manifest: &AssetManifest, config: &SceneConfig) -> Result<AtlasStore, AssetError> {
    let mut store = AtlasStore::new();
    for asset in &manifest.atlases {
        let path = config.asset_path(&asset.data);
        let atlas = Atlas::from_json(&read_text(&path)?)?;
        info!("Loaded atlas '{}' from {:?}: {} frames", asset.key, path, atlas.len());
        store.insert(asset.key.clone(), atlas);
    }
    Ok(store)
}

fn load_texture(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    path: &Path,
    pixel_art: bool,
) -> Result<Texture2D, AssetError> {
    let texture = rl
        .load_texture(th, &path.to_string_lossy())
        .map_err(|e| AssetError::Texture {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let filter = if pixel_art {
        TextureFilter::TEXTURE_FILTER_POINT as i32
    } else {
        TextureFilter::TEXTURE_FILTER_BILINEAR as i32
    };
    unsafe {
        ffi::SetTextureFilter(*texture, filter);
    }
    Ok(texture)
}

/// Upload every image of `manifest`, atlas images included.
pub fn load_textures(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    manifest: &AssetManifest,
    config: &SceneConfig,
) -> Result<TextureStore, AssetError> {
    let mut store = TextureStore::new();
    let images = manifest
        .images
        .iter()
        .map(|(key, path)| (key, path))
        .chain(manifest.atlases.iter().map(|a| (&a.key, &a.image)));
    for (key, path) in images {
        let path = config.asset_path(path);
        let texture = load_texture(rl, th, &path, config.pixel_art)?;
        info!(
            "Loaded texture '{}' from {:?} ({}x{})",
            key, path, texture.width, texture.height
        );
        store.insert(key.clone(), texture);
    }
    Ok(store)
}

/// Load everything `manifest` declares and put the stores into `world`.
///
/// Reads the [`SceneConfig`] already in `world` for the asset root and the
/// texture filter.
pub fn preload(
    world: &mut World,
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    manifest: &AssetManifest,
) -> Result<(), AssetError> {
    let config = world.resource::<SceneConfig>().clone();
    let tilemaps = load_tilemaps(manifest, &config)?;
    let atlases = load_atlases(manifest, &config)?;
    let textures = load_textures(rl, th, manifest, &config)?;

    world.insert_resource(tilemaps);
    world.insert_resource(atlases);
    world.insert_non_send_resource(textures);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::atlas::tests::sample_atlas_json;
    use crate::resources::tilemap::tests::SAMPLE_MAP;

    fn asset_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tilemaps")).unwrap();
        fs::create_dir_all(dir.path().join("atlas")).unwrap();
        fs::write(dir.path().join("tilemaps/map3.json"), SAMPLE_MAP).unwrap();
        fs::write(dir.path().join("atlas/agv.json"), sample_atlas_json()).unwrap();
        dir
    }

    #[test]
    fn test_load_json_assets() {
        let dir = asset_dir();
        let config = SceneConfig::new().with_asset_root(dir.path());
        let manifest = AssetManifest::new()
            .tilemap_tiled_json("map", "tilemaps/map3.json")
            .atlas("atlas", "atlas/agv.png", "atlas/agv.json");

        let tilemaps = load_tilemaps(&manifest, &config).unwrap();
        assert_eq!(tilemaps.get("map").unwrap().width, 4);
        let atlases = load_atlases(&manifest, &config).unwrap();
        assert!(atlases.frame("atlas", "agv/up/0004").is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = asset_dir();
        let config = SceneConfig::new().with_asset_root(dir.path());
        let manifest = AssetManifest::new().tilemap_tiled_json("map", "tilemaps/nope.json");
        match load_tilemaps(&manifest, &config) {
            Err(AssetError::Io { path, .. }) => assert!(path.ends_with("tilemaps/nope.json")),
            other => panic!("expected an I/O error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_atlas_is_json_error() {
        let dir = asset_dir();
        fs::write(dir.path().join("atlas/bad.json"), "{ frames: ").unwrap();
        let config = SceneConfig::new().with_asset_root(dir.path());
        let manifest = AssetManifest::new().atlas("atlas", "atlas/agv.png", "atlas/bad.json");
        assert!(matches!(
            load_atlases(&manifest, &config),
            Err(AssetError::Json { .. })
        ));
    }
}
