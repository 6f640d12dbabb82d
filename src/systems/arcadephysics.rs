//! Arcade physics step.
//!
//! Integrates [`RigidBody`] velocities into [`MapPosition`]s and keeps bodies
//! with a [`BoxCollider`] and a [`TileCollider`] out of solid tiles.
//!
//! A tick is split into slices no longer than 1/60 s, and short enough that
//! no slice carries a body further than its own size or a tile's. In each
//! slice a body first gains `gravity * gravity_scale * h` of velocity.
//! Then the x axis is moved and separated, then the y axis, so a body sliding
//! along a wall keeps its motion along it. A tile only stops a body through a
//! face that borders open space and that the body was not already past before
//! this step. When a body is stopped it is placed flush against the face, the
//! velocity on that axis is zeroed and a [`TileCollisionEvent`] is triggered.

use bevy_ecs::prelude::*;
use raylib::prelude::{Rectangle, Vector2};

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{Blocked, RigidBody};
use crate::components::tilecollider::TileCollider;
use crate::events::tilecollision::{CollisionSide, TileCollisionEvent};
use crate::resources::collisionlayer::{CollisionLayer, CollisionLayers};
use crate::resources::sceneconfig::SceneConfig;
use crate::resources::worldtime::WorldTime;

/// Slack allowed when deciding whether a body came from outside a face.
const EDGE_EPSILON: f32 = 1e-3;

/// Longest slice of a tick integrated at once.
const MAX_STEP: f32 = 1.0 / 60.0;

/// Slices per tick after a long stall.
const MAX_SUBSTEPS: u32 = 240;

/// Number of equal slices to split a `dt` tick into.
///
/// No slice is longer than [`MAX_STEP`] and none moves a body going at
/// `speed` further than `max_travel`. Zero for an empty tick.
pub fn substeps(dt: f32, speed: f32, max_travel: f32) -> u32 {
    if dt <= 0.0 {
        return 0;
    }
    let by_time = (dt / MAX_STEP).ceil();
    let by_travel = if max_travel > 0.0 && max_travel.is_finite() {
        (speed * dt / max_travel).ceil()
    } else {
        0.0
    };
    (by_time.max(by_travel) as u32).clamp(1, MAX_SUBSTEPS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, v: Vector2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn set(self, v: &mut Vector2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    /// (start, extent) of `rect` along this axis.
    fn span(self, rect: Rectangle) -> (f32, f32) {
        match self {
            Axis::X => (rect.x, rect.width),
            Axis::Y => (rect.y, rect.height),
        }
    }
}

/// A body stopped by a tile during one axis move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHit {
    /// Body position after being pushed out.
    pub position: Vector2,
    pub tile: (u32, u32),
    /// Side of the body that touched the tile.
    pub side: CollisionSide,
}

/// Push a body that just moved `delta` along `axis` back out of `layer`.
///
/// `position` is the body's pivot after the move. Returns `None` when no tile
/// blocks the move. If several tiles do, the one needing the largest push wins.
pub fn separate_axis(
    layer: &CollisionLayer,
    collider: &BoxCollider,
    position: Vector2,
    delta: f32,
    axis: Axis,
) -> Option<TileHit> {
    if delta == 0.0 {
        return None;
    }
    let (min, max) = collider.aabb(position);
    let (body_min, body_max) = (axis.of(min), axis.of(max));

    let mut best: Option<(f32, (u32, u32))> = None;
    for (tx, ty) in layer.overlapping(min, max) {
        let faces = layer.faces(tx, ty);
        let (start, extent) = axis.span(layer.tile_rect(tx, ty));
        let end = start + extent;
        let correction = if delta > 0.0 {
            let open = match axis {
                Axis::X => faces.left,
                Axis::Y => faces.top,
            };
            if !open || body_max - delta > start + EDGE_EPSILON {
                continue;
            }
            start - body_max
        } else {
            let open = match axis {
                Axis::X => faces.right,
                Axis::Y => faces.bottom,
            };
            if !open || body_min - delta < end - EDGE_EPSILON {
                continue;
            }
            end - body_min
        };
        if best.is_none_or(|(c, _)| correction.abs() > c.abs()) {
            best = Some((correction, (tx, ty)));
        }
    }

    best.map(|(correction, tile)| {
        let mut corrected = position;
        axis.set(&mut corrected, axis.of(position) + correction);
        let side = match (axis, delta > 0.0) {
            (Axis::X, true) => CollisionSide::Right,
            (Axis::X, false) => CollisionSide::Left,
            (Axis::Y, true) => CollisionSide::Bottom,
            (Axis::Y, false) => CollisionSide::Top,
        };
        TileHit {
            position: corrected,
            tile,
            side,
        }
    })
}

fn mark_blocked(blocked: &mut Blocked, side: CollisionSide) {
    match side {
        CollisionSide::Left => blocked.left = true,
        CollisionSide::Right => blocked.right = true,
        CollisionSide::Top => blocked.up = true,
        CollisionSide::Bottom => blocked.down = true,
    }
}

/// Integrate velocities and resolve tile collisions for one tick.
pub fn arcade_physics(
    mut query: Query<(
        Entity,
        &mut MapPosition,
        &mut RigidBody,
        Option<&BoxCollider>,
        Option<&TileCollider>,
    )>,
    layers: Res<CollisionLayers>,
    config: Res<SceneConfig>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let dt = time.delta;
    let gravity = config.physics.map(|p| p.gravity).unwrap_or_default();

    for (entity, mut position, mut body, collider, tile_collider) in query.iter_mut() {
        body.blocked = Blocked::default();
        let accel = gravity * body.gravity_scale;

        let solid = collider.zip(tile_collider);
        let max_travel = solid.map_or(f32::INFINITY, |(collider, tile_collider)| {
            tile_collider
                .layers
                .iter()
                .filter_map(|name| layers.get(name))
                .map(CollisionLayer::tile_size)
                .fold(collider.size.x.abs().min(collider.size.y.abs()), |m, t| {
                    m.min(t.x).min(t.y)
                })
        });
        let speed = body.velocity.length() + accel.length() * dt;
        let steps = substeps(dt, speed, max_travel);
        if steps == 0 {
            continue;
        }
        let h = dt / steps as f32;

        for _ in 0..steps {
            body.velocity += accel * h;

            for axis in [Axis::X, Axis::Y] {
                let delta = axis.of(body.velocity) * h;
                let mut pos = position.pos;
                axis.set(&mut pos, axis.of(pos) + delta);

                if let Some((collider, tile_collider)) = solid {
                    for name in &tile_collider.layers {
                        let Some(layer) = layers.get(name) else {
                            continue;
                        };
                        let Some(hit) = separate_axis(layer, collider, pos, delta, axis) else {
                            continue;
                        };
                        pos = hit.position;
                        axis.set(&mut body.velocity, 0.0);
                        mark_blocked(&mut body.blocked, hit.side);
                        commands.trigger(TileCollisionEvent {
                            entity,
                            layer: name.clone(),
                            tile_x: hit.tile.0,
                            tile_y: hit.tile.1,
                            side: hit.side,
                        });
                    }
                }
                position.pos = pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::schedule::Schedule;

    const EPSILON: f32 = 1e-4;

    /// 5x5 grid of 16px tiles with a solid column at x = 3.
    fn wall() -> CollisionLayer {
        let mut layer = CollisionLayer::new(5, 5, 16.0, 16.0);
        for y in 0..5 {
            layer.set_solid(3, y, true);
        }
        layer
    }

    fn body() -> BoxCollider {
        BoxCollider::new(10.0, 10.0)
    }

    #[test]
    fn test_moving_right_into_wall_snaps_flush() {
        let layer = wall();
        // body spans x 35..45 after moving 5px right; wall starts at 48
        assert!(separate_axis(&layer, &body(), Vector2::new(35.0, 20.0), 5.0, Axis::X).is_none());
        // body spans 40..50 after moving 5px, overlaps the wall by 2
        let hit = separate_axis(&layer, &body(), Vector2::new(40.0, 20.0), 5.0, Axis::X).unwrap();
        assert!((hit.position.x - 38.0).abs() < EPSILON);
        assert_eq!(hit.side, CollisionSide::Right);
        assert_eq!(hit.tile.0, 3);
    }

    #[test]
    fn test_moving_left_into_wall() {
        let layer = wall();
        // wall ends at 64, body spans 62..72 after moving 4px left
        let hit = separate_axis(&layer, &body(), Vector2::new(62.0, 20.0), -4.0, Axis::X).unwrap();
        assert!((hit.position.x - 64.0).abs() < EPSILON);
        assert_eq!(hit.side, CollisionSide::Left);
    }

    #[test]
    fn test_vertical_move_along_wall_is_free() {
        let layer = wall();
        // flush against the wall's left face and sliding down
        assert!(separate_axis(&layer, &body(), Vector2::new(38.0, 30.0), 5.0, Axis::Y).is_none());
    }

    #[test]
    fn test_interior_faces_do_not_collide() {
        let mut layer = CollisionLayer::new(4, 1, 16.0, 16.0);
        layer.set_solid(1, 0, true);
        layer.set_solid(2, 0, true);
        // left face of tile 2 is shared with tile 1, only tile 1 can stop a body
        let hit = separate_axis(&layer, &body(), Vector2::new(8.0, 2.0), 4.0, Axis::X).unwrap();
        assert_eq!(hit.tile, (1, 0));
        assert!((hit.position.x - 6.0).abs() < EPSILON);
        // a body already inside tile 1 is not pushed through tile 2's shared face
        assert!(separate_axis(&layer, &body(), Vector2::new(20.0, 2.0), 4.0, Axis::X).is_none());
    }

    #[test]
    fn test_falling_onto_floor() {
        let mut layer = CollisionLayer::new(3, 3, 16.0, 16.0);
        for x in 0..3 {
            layer.set_solid(x, 2, true);
        }
        let hit = separate_axis(&layer, &body(), Vector2::new(10.0, 25.0), 3.0, Axis::Y).unwrap();
        assert!((hit.position.y - 22.0).abs() < EPSILON);
        assert_eq!(hit.side, CollisionSide::Bottom);
    }

    #[test]
    fn test_substeps() {
        assert_eq!(substeps(0.0, 175.0, 30.0), 0);
        assert_eq!(substeps(1.0 / 60.0, 175.0, 30.0), 1);
        assert!((30..=31).contains(&substeps(0.5, 175.0, 30.0)));
        // fast body: 2000 px/s for 1/60 s is 33 px, over a 10 px body
        assert_eq!(substeps(1.0 / 60.0, 2000.0, 10.0), 4);
        assert_eq!(substeps(1000.0, 0.0, f32::INFINITY), MAX_SUBSTEPS);
    }

    fn long_frame_world(dt: f32) -> (World, Entity) {
        // 8x4 grid of 32px tiles, one-tile wall at column 5 (x 160..192)
        let mut layer = CollisionLayer::new(8, 4, 32.0, 32.0);
        for y in 0..4 {
            layer.set_solid(5, y, true);
        }
        let mut layers = CollisionLayers::new();
        layers.insert("World", layer);

        let mut world = World::new();
        world.insert_resource(layers);
        world.insert_resource(SceneConfig::default());
        world.insert_resource(WorldTime {
            delta: dt,
            ..Default::default()
        });
        let mut body = RigidBody::new();
        body.velocity = Vector2::new(175.0, 0.0);
        let entity = world
            .spawn((
                MapPosition::new(120.0, 40.0),
                body,
                BoxCollider::new(30.0, 40.0),
                TileCollider::new("World"),
            ))
            .id();
        (world, entity)
    }

    #[test]
    fn test_long_frame_does_not_pass_through_wall() {
        let (mut world, entity) = long_frame_world(0.5);
        let mut schedule = Schedule::default();
        schedule.add_systems(arcade_physics);
        schedule.run(&mut world);

        // 87.5 px in one tick would put the body at 207.5, past the wall
        let position = world.get::<MapPosition>(entity).unwrap();
        assert!((position.pos.x - 130.0).abs() < EPSILON);
        let body = world.get::<RigidBody>(entity).unwrap();
        assert_eq!(body.velocity.x, 0.0);
        assert!(body.blocked.right);
    }

    #[test]
    fn test_zero_delta_never_collides() {
        let layer = wall();
        assert!(separate_axis(&layer, &body(), Vector2::new(44.0, 20.0), 0.0, Axis::X).is_none());
    }
}
