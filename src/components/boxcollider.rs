use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned physics body box, relative to the entity's
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Modify BoxCollider with given offset from the entity position
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Body of `size` placed `offset` pixels from a frame's top-left corner,
    /// for a sprite whose pivot is `origin` pixels into that frame.
    pub fn in_frame(size: Vector2, offset: Vector2, origin: Vector2) -> Self {
        Self {
            size,
            offset: offset - origin,
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    /// (x, y, width, height) of the AABB.
    pub fn get_aabb(&self, position: Vector2) -> (f32, f32, f32, f32) {
        let (min, max) = self.aabb(position);
        (min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Centre of the AABB.
    pub fn center(&self, position: Vector2) -> Vector2 {
        let (min, max) = self.aabb(position);
        (min + max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_frame_converts_offset() {
        // 32x64 frame, pivot at centre, body 30x40 at (0, 24) from top-left
        let body = BoxCollider::in_frame(
            Vector2::new(30.0, 40.0),
            Vector2::new(0.0, 24.0),
            Vector2::new(16.0, 32.0),
        );
        assert_eq!((body.offset.x, body.offset.y), (-16.0, -8.0));
        let (x, y, w, h) = body.get_aabb(Vector2::new(100.0, 100.0));
        assert_eq!((x, y, w, h), (84.0, 92.0, 30.0, 40.0));
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let body = BoxCollider::new(-10.0, 10.0);
        let (min, max) = body.aabb(Vector2::new(0.0, 0.0));
        assert_eq!((min.x, max.x), (-10.0, 0.0));
    }

    #[test]
    fn test_center() {
        let body = BoxCollider::new(10.0, 20.0).with_offset(Vector2::new(-5.0, 0.0));
        let c = body.center(Vector2::new(50.0, 50.0));
        assert_eq!((c.x, c.y), (50.0, 60.0));
    }
}
