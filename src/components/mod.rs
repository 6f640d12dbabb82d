//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – playback state of a sprite animation clip
//! - [`boxcollider`] – axis-aligned physics body box
//! - [`cameratarget`] – marks the entity the camera follows
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`player`] – keyboard-walked player and its directional clips
//! - [`rigidbody`] – velocity and blocked sides of a physics body
//! - [`screenposition`] – screen-space position for overlays
//! - [`screentext`] – text drawn on top of the world
//! - [`sprite`] – textured rectangle drawn at the entity's position
//! - [`tilecollider`] – collision layers a body cannot enter
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod boxcollider;
pub mod cameratarget;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
pub mod screenposition;
pub mod screentext;
pub mod sprite;
pub mod tilecollider;
pub mod zindex;
