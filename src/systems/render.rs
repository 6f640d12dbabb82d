//! Rendering.
//!
//! [`render_system`] draws one frame: the world pass through the main camera
//! (sprites sorted by [`ZIndex`], culled against the visible area), the debug
//! overlay on top of it when [`DebugMode`] is present, then screen-fixed
//! texts and the debug diagnostics.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::screenposition::ScreenPosition;
use crate::components::screentext::ScreenText;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::collisionlayer::CollisionLayers;
use crate::resources::debugmode::DebugMode;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

const BACKGROUND: Color = Color::new(0, 0, 0, 255);
/// Fill of solid tiles in the debug overlay.
const DEBUG_TILE: Color = Color::new(243, 134, 48, 191);
/// Exposed faces of solid tiles in the debug overlay.
const DEBUG_FACE: Color = Color::new(40, 39, 37, 191);
const DEBUG_TEXT: Color = Color::new(255, 255, 255, 255);

fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    textures: NonSend<TextureStore>,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    debug: Option<Res<DebugMode>>,
    collision_layers: Option<Res<CollisionLayers>>,
    sprites: Query<(&Sprite, &MapPosition, Option<&ZIndex>)>,
    bodies: Query<(&BoxCollider, &MapPosition, Option<&RigidBody>)>,
    texts: Query<(&ScreenText, &ScreenPosition)>,
) {
    let view = camera.view_rect(screen.as_vec());

    let mut to_draw: Vec<(&Sprite, Rectangle, i32)> = sprites
        .iter()
        .filter_map(|(sprite, position, z)| {
            let dest = sprite.world_rect(position.pos);
            overlaps(&dest, &view).then_some((sprite, dest, z.map_or(0, |z| z.0)))
        })
        .collect();
    to_draw.sort_by_key(|(_, _, z)| *z);

    let fps = rl.get_fps();
    let mut d = rl.begin_drawing(&th);
    d.clear_background(BACKGROUND);

    {
        let mut d2 = d.begin_mode2D(camera.0);

        for (sprite, dest, _) in to_draw.iter() {
            if let Some(tex) = textures.get(&sprite.tex_key) {
                d2.draw_texture_pro(
                    tex,
                    sprite.source_rect(),
                    *dest,
                    Vector2::zero(),
                    0.0,
                    sprite.tint,
                );
            }
        }

        if debug.is_some() {
            if let Some(collision_layers) = collision_layers.as_ref() {
                for layer in collision_layers.layers.values() {
                    for (tx, ty) in layer.iter_solid() {
                        let rect = layer.tile_rect(tx, ty);
                        if !overlaps(&rect, &view) {
                            continue;
                        }
                        d2.draw_rectangle_rec(rect, DEBUG_TILE);
                        let faces = layer.faces(tx, ty);
                        let (l, t) = (rect.x, rect.y);
                        let (r, b) = (rect.x + rect.width, rect.y + rect.height);
                        if faces.left {
                            d2.draw_line_ex(Vector2::new(l, t), Vector2::new(l, b), 2.0, DEBUG_FACE);
                        }
                        if faces.right {
                            d2.draw_line_ex(Vector2::new(r, t), Vector2::new(r, b), 2.0, DEBUG_FACE);
                        }
                        if faces.top {
                            d2.draw_line_ex(Vector2::new(l, t), Vector2::new(r, t), 2.0, DEBUG_FACE);
                        }
                        if faces.bottom {
                            d2.draw_line_ex(Vector2::new(l, b), Vector2::new(r, b), 2.0, DEBUG_FACE);
                        }
                    }
                }
            }

            for (collider, position, body) in bodies.iter() {
                let (x, y, w, h) = collider.get_aabb(position.pos);
                d2.draw_rectangle_lines_ex(Rectangle::new(x, y, w, h), 1.0, Color::MAGENTA);
                if let Some(body) = body {
                    let center = collider.center(position.pos);
                    d2.draw_line_ex(center, center + body.velocity * 0.25, 1.0, Color::GREEN);
                }
            }
        }
    }

    for (text, position) in texts.iter() {
        let line_height = text.font_size as f32;
        if let Some(background) = text.background {
            let width = text
                .content
                .lines()
                .map(|line| measure_text(line, text.font_size))
                .max()
                .unwrap_or(0) as f32;
            let height = line_height * text.line_count() as f32;
            d.draw_rectangle_rec(
                Rectangle::new(
                    position.pos.x,
                    position.pos.y,
                    width + text.padding.x * 2.0,
                    height + text.padding.y * 2.0,
                ),
                background,
            );
        }
        for (i, line) in text.content.lines().enumerate() {
            d.draw_text(
                line,
                (position.pos.x + text.padding.x) as i32,
                (position.pos.y + text.padding.y + line_height * i as f32) as i32,
                text.font_size,
                text.color,
            );
        }
    }

    if debug.is_some() {
        let cam = camera.0;
        let lines = [
            format!("DEBUG (D to toggle) | FPS: {}", fps),
            format!(
                "Camera: ({:.1}, {:.1}) zoom {:.2}",
                cam.target.x, cam.target.y, cam.zoom
            ),
            format!("Sprites drawn: {}", to_draw.len()),
        ];
        for (i, line) in lines.iter().enumerate() {
            d.draw_text(line, 10, screen.h - 20 * (lines.len() - i) as i32 - 10, 10, DEBUG_TEXT);
        }
    }
}
