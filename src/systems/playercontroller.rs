//! Keyboard-driven walking for the player.
//!
//! [`select_movement`] turns the held direction keys and the body's previous
//! velocity into a new velocity and an animation command. The
//! [`player_controller`] system applies that to every
//! [`PlayerController`] entity once per tick, before the physics step.
//!
//! Walking speed is the same in all eight directions. While a key is held the
//! matching walk clip plays, horizontal keys taking precedence. When no key is
//! held the clip stops and the body shows the idle frame of the direction it
//! was last moving in.
use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::player::{Facing, PlayerController};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::resources::atlas::AtlasStore;
use crate::resources::input::InputState;

/// Held state of the four direction keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionKeys {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.direction_left.active,
            right: input.direction_right.active,
            up: input.direction_up.active,
            down: input.direction_down.active,
        }
    }
}

/// What the sprite should show after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCommand {
    /// Play the walk clip for this direction.
    Walk(Facing),
    /// Stop walking. `idle` is the direction whose idle frame to show, or
    /// `None` to keep the current frame.
    Stop { idle: Option<Facing> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub velocity: Vector2,
    pub animation: AnimationCommand,
}

/// Compute this tick's velocity and animation.
///
/// `previous` is the body's velocity before this tick and only matters when
/// no key is held.
pub fn select_movement(keys: DirectionKeys, previous: Vector2, speed: f32) -> Movement {
    let mut velocity = Vector2::zero();

    if keys.left {
        velocity.x = -speed;
    } else if keys.right {
        velocity.x = speed;
    }

    if keys.up {
        velocity.y = -speed;
    } else if keys.down {
        velocity.y = speed;
    }

    if velocity.x != 0.0 || velocity.y != 0.0 {
        velocity = velocity.normalized() * speed;
    }

    let animation = if keys.left {
        AnimationCommand::Walk(Facing::Left)
    } else if keys.right {
        AnimationCommand::Walk(Facing::Right)
    } else if keys.up {
        AnimationCommand::Walk(Facing::Up)
    } else if keys.down {
        AnimationCommand::Walk(Facing::Down)
    } else {
        AnimationCommand::Stop {
            idle: idle_facing(previous),
        }
    };

    Movement {
        velocity,
        animation,
    }
}

fn idle_facing(previous: Vector2) -> Option<Facing> {
    if previous.x < 0.0 {
        Some(Facing::Left)
    } else if previous.x > 0.0 {
        Some(Facing::Right)
    } else if previous.y < 0.0 {
        Some(Facing::Up)
    } else if previous.y > 0.0 {
        Some(Facing::Down)
    } else {
        None
    }
}

/// Apply [`select_movement`] to every player-controlled body.
pub fn player_controller(
    mut query: Query<(&PlayerController, &mut RigidBody, &mut Animation, &mut Sprite)>,
    input: Res<InputState>,
    atlases: Res<AtlasStore>,
) {
    let keys = DirectionKeys::from_input(&input);
    for (controller, mut body, mut animation, mut sprite) in query.iter_mut() {
        let movement = select_movement(keys, body.velocity, controller.speed);
        body.velocity = movement.velocity;

        match movement.animation {
            AnimationCommand::Walk(facing) => {
                animation.play(&controller.clips.get(facing).walk, true);
            }
            AnimationCommand::Stop { idle } => {
                animation.stop();
                let Some(facing) = idle else {
                    continue;
                };
                let frame_name = &controller.clips.get(facing).idle_frame;
                match atlases.frame(&sprite.tex_key, frame_name) {
                    Some(frame) => sprite.set_frame(frame),
                    None => warn!("Idle frame '{}' missing from atlas '{}'", frame_name, sprite.tex_key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 175.0;
    const EPSILON: f32 = 1e-3;

    fn keys(left: bool, right: bool, up: bool, down: bool) -> DirectionKeys {
        DirectionKeys {
            left,
            right,
            up,
            down,
        }
    }

    #[test]
    fn test_no_keys_zero_velocity() {
        let m = select_movement(DirectionKeys::default(), Vector2::zero(), SPEED);
        assert_eq!(m.velocity, Vector2::zero());
        assert_eq!(m.animation, AnimationCommand::Stop { idle: None });
    }

    #[test]
    fn test_single_key_full_speed() {
        let m = select_movement(keys(false, true, false, false), Vector2::zero(), SPEED);
        assert!((m.velocity.x - SPEED).abs() < EPSILON);
        assert_eq!(m.velocity.y, 0.0);
        assert_eq!(m.animation, AnimationCommand::Walk(Facing::Right));

        let m = select_movement(keys(false, false, true, false), Vector2::zero(), SPEED);
        assert!((m.velocity.y + SPEED).abs() < EPSILON);
        assert_eq!(m.animation, AnimationCommand::Walk(Facing::Up));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let m = select_movement(keys(false, true, false, true), Vector2::zero(), SPEED);
        assert!((m.velocity.x - 123.744).abs() < EPSILON);
        assert!((m.velocity.y - 123.744).abs() < EPSILON);
        assert!((m.velocity.length() - SPEED).abs() < EPSILON);
        assert_eq!(m.animation, AnimationCommand::Walk(Facing::Right));
    }

    #[test]
    fn test_left_and_right_held_walks_left() {
        let m = select_movement(keys(true, true, false, false), Vector2::zero(), SPEED);
        assert_eq!(m.velocity, Vector2::new(-175.0, 0.0));
        assert_eq!(m.animation, AnimationCommand::Walk(Facing::Left));
    }

    #[test]
    fn test_all_keys_left_and_up_win() {
        let m = select_movement(keys(true, true, true, true), Vector2::zero(), SPEED);
        assert!(m.velocity.x < 0.0 && m.velocity.y < 0.0);
        assert!((m.velocity.length() - SPEED).abs() < EPSILON);
        assert_eq!(m.animation, AnimationCommand::Walk(Facing::Left));
    }

    #[test]
    fn test_idle_frame_from_previous_velocity() {
        let none = DirectionKeys::default();
        let idle = |prev: Vector2| select_movement(none, prev, SPEED).animation;
        assert_eq!(
            idle(Vector2::new(0.0, -175.0)),
            AnimationCommand::Stop {
                idle: Some(Facing::Up)
            }
        );
        assert_eq!(
            idle(Vector2::new(0.0, 175.0)),
            AnimationCommand::Stop {
                idle: Some(Facing::Down)
            }
        );
        // horizontal wins over vertical
        assert_eq!(
            idle(Vector2::new(-10.0, 175.0)),
            AnimationCommand::Stop {
                idle: Some(Facing::Left)
            }
        );
        assert_eq!(
            idle(Vector2::new(123.7, -123.7)),
            AnimationCommand::Stop {
                idle: Some(Facing::Right)
            }
        );
    }

    #[test]
    fn test_same_input_same_output() {
        let k = keys(true, false, false, true);
        let prev = Vector2::new(3.0, 4.0);
        assert_eq!(select_movement(k, prev, SPEED), select_movement(k, prev, SPEED));
    }

    #[test]
    fn test_keys_from_input() {
        let mut input = InputState::default();
        input.direction_left.active = true;
        input.zoom_in.active = true;
        assert_eq!(DirectionKeys::from_input(&input), keys(true, false, false, false));
    }
}
