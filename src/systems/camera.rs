//! Camera follow and bounds.
//!
//! - [`camera_follow`] centres the camera on the [`CameraTarget`] entity.
//! - [`clamp_camera`] keeps the view inside [`CameraBounds`]; it runs after
//!   every other system that moves or zooms the camera.
use bevy_ecs::prelude::*;

use crate::components::cameratarget::CameraTarget;
use crate::components::mapposition::MapPosition;
use crate::resources::camera2d::{Camera2DRes, CameraBounds};
use crate::resources::screensize::ScreenSize;

/// Centre the camera on the followed entity's pivot.
pub fn camera_follow(
    query: Query<&MapPosition, With<CameraTarget>>,
    mut camera: ResMut<Camera2DRes>,
) {
    let Some(position) = query.iter().next() else {
        return;
    };
    camera.0.target = position.pos;
}

/// Keep the visible area inside the camera bounds, if any.
pub fn clamp_camera(
    bounds: Option<Res<CameraBounds>>,
    screen: Res<ScreenSize>,
    mut camera: ResMut<Camera2DRes>,
) {
    let Some(bounds) = bounds else {
        return;
    };
    let cam = camera.0;
    camera.0.target = bounds.clamp(cam.target, screen.as_vec(), cam.zoom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::BoxCollider;
    use bevy_ecs::schedule::Schedule;
    use raylib::prelude::Vector2;

    fn world(bounds: Option<CameraBounds>) -> World {
        let mut world = World::new();
        world.insert_resource(ScreenSize { w: 800, h: 600 });
        world.insert_resource(Camera2DRes::for_screen(Vector2::new(800.0, 600.0)));
        if let Some(bounds) = bounds {
            world.insert_resource(bounds);
        }
        world
    }

    #[test]
    fn test_follow_then_clamp() {
        let mut world = world(Some(CameraBounds::new(0.0, 0.0, 1600.0, 1200.0)));
        let target = world
            .spawn((
                MapPosition::new(1500.0, 100.0),
                BoxCollider::new(30.0, 40.0).with_offset(Vector2::new(-16.0, -8.0)),
                CameraTarget,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems((camera_follow, clamp_camera).chain());
        schedule.run(&mut world);

        let cam = world.resource::<Camera2DRes>().0;
        assert_eq!(cam.target.x, 1200.0);
        assert_eq!(cam.target.y, 300.0);

        world.get_mut::<MapPosition>(target).unwrap().pos = Vector2::new(800.0, 600.0);
        schedule.run(&mut world);
        let cam = world.resource::<Camera2DRes>().0;
        // the sprite pivot, not the body centre (799, 612)
        assert_eq!(cam.target.x, 800.0);
        assert_eq!(cam.target.y, 600.0);
    }

    #[test]
    fn test_without_bounds_nothing_is_clamped() {
        let mut world = world(None);
        world.resource_mut::<Camera2DRes>().0.target = Vector2::new(-500.0, -500.0);

        let mut schedule = Schedule::default();
        schedule.add_systems((camera_follow, clamp_camera).chain());
        schedule.run(&mut world);

        let cam = world.resource::<Camera2DRes>().0;
        assert_eq!(cam.target.x, -500.0);
    }
}
