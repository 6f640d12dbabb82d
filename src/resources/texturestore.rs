//! Loaded GPU textures keyed by string IDs.
//!
//! Inserted as a non-send resource: textures belong to the thread that owns
//! the raylib context.
use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }
}
