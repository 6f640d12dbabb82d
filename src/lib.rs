//! Tile scene library.
//!
//! Exposes the ECS components, resources, systems, events and scenes of the
//! demo for use by the binary and by integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod scenes;
pub mod systems;
