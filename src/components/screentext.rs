//! Screen-fixed text label.
//!
//! A [`ScreenText`] is drawn after the world pass at its entity's
//! [`ScreenPosition`](super::screenposition::ScreenPosition), optionally on a
//! filled box that extends `padding` pixels past the glyphs.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

#[derive(Component, Clone, Debug)]
pub struct ScreenText {
    /// The text content to render. Lines are split on `\n`.
    pub content: String,
    /// Font size in screen pixels.
    pub font_size: i32,
    pub color: Color,
    /// Fill drawn behind the text, if any.
    pub background: Option<Color>,
    /// Horizontal and vertical space between text and background edge.
    pub padding: Vector2,
}

impl ScreenText {
    pub fn new(content: impl Into<String>, font_size: i32, color: Color) -> Self {
        Self {
            content: content.into(),
            font_size,
            color,
            background: None,
            padding: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    /// Draw on a `background` box padded by `padding` on each side.
    pub fn with_background(mut self, background: Color, padding: Vector2) -> Self {
        self.background = Some(background);
        self.padding = padding;
        self
    }

    /// Number of text lines.
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }
}
