//! Texture atlases.
//!
//! An atlas packs many named sub-images (animation frames) into one texture
//! and describes them in a TexturePacker JSON file. Both the "hash" layout
//! (`frames` is an object keyed by name) and the "array" layout (`frames` is
//! a list of objects with a `filename`) are accepted.

use bevy_ecs::prelude::Resource;
use log::warn;
use raylib::prelude::{Rectangle, Vector2};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::AssetError;

#[derive(Debug, Deserialize)]
struct RawAtlas {
    frames: RawFrames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFrames {
    Hash(FxHashMap<String, RawFrame>),
    Array(Vec<RawNamedFrame>),
}

#[derive(Debug, Deserialize)]
struct RawNamedFrame {
    filename: String,
    #[serde(flatten)]
    frame: RawFrame,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    frame: RawRect,
    #[serde(default)]
    rotated: bool,
    #[serde(default, rename = "spriteSourceSize")]
    sprite_source_size: Option<RawRect>,
    #[serde(default, rename = "sourceSize")]
    source_size: Option<RawSize>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct RawRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct RawSize {
    w: f32,
    h: f32,
}

/// One named sub-image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasFrame {
    /// Pixels to copy from the atlas texture.
    pub rect: Rectangle,
    /// Size of the untrimmed image.
    pub source_size: Vector2,
    /// Where the trimmed rect sits inside the untrimmed image.
    pub trim_offset: Vector2,
}

impl AtlasFrame {
    fn from_raw(name: &str, raw: RawFrame) -> Self {
        if raw.rotated {
            warn!("Atlas frame '{}' is rotated; drawing it unrotated", name);
        }
        let rect = Rectangle {
            x: raw.frame.x,
            y: raw.frame.y,
            width: raw.frame.w,
            height: raw.frame.h,
        };
        let source_size = raw
            .source_size
            .map(|s| Vector2::new(s.w, s.h))
            .unwrap_or(Vector2::new(rect.width, rect.height));
        let trim_offset = raw
            .sprite_source_size
            .map(|s| Vector2::new(s.x, s.y))
            .unwrap_or(Vector2::zero());
        Self {
            rect,
            source_size,
            trim_offset,
        }
    }
}

/// Frames of one atlas texture, by name.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    pub frames: FxHashMap<String, AtlasFrame>,
}

impl Atlas {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let raw: RawAtlas = serde_json::from_str(json).map_err(|source| AssetError::Json {
            what: "atlas".into(),
            source,
        })?;
        let frames = match raw.frames {
            RawFrames::Hash(frames) => frames
                .into_iter()
                .map(|(name, f)| {
                    let frame = AtlasFrame::from_raw(&name, f);
                    (name, frame)
                })
                .collect(),
            RawFrames::Array(frames) => frames
                .into_iter()
                .map(|f| {
                    let frame = AtlasFrame::from_raw(&f.filename, f.frame);
                    (f.filename, frame)
                })
                .collect(),
        };
        Ok(Self { frames })
    }

    pub fn frame(&self, name: &str) -> Option<&AtlasFrame> {
        self.frames.get(name)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Loaded atlases keyed like their textures in the texture store.
#[derive(Resource, Debug, Default)]
pub struct AtlasStore {
    pub map: FxHashMap<String, Atlas>,
}

impl AtlasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Atlas> {
        self.map.get(key.as_ref())
    }

    pub fn insert(&mut self, key: impl Into<String>, atlas: Atlas) {
        self.map.insert(key.into(), atlas);
    }

    /// Shortcut for `get(atlas)?.frame(frame)`.
    pub fn frame(&self, atlas: &str, frame: &str) -> Option<&AtlasFrame> {
        self.get(atlas)?.frame(frame)
    }
}

/// Build a sequence of frame names such as `agv/down/0001`..`agv/down/0004`.
///
/// Counts down when `start > end`. Numbers are left-padded with zeros to
/// `zero_pad` digits.
pub fn generate_frame_names(
    prefix: &str,
    start: u32,
    end: u32,
    zero_pad: usize,
    suffix: &str,
) -> Vec<String> {
    let numbers: Vec<u32> = if start <= end {
        (start..=end).collect()
    } else {
        (end..=start).rev().collect()
    };
    numbers
        .into_iter()
        .map(|n| format!("{prefix}{n:0zero_pad$}{suffix}"))
        .collect()
}
