//! Scene systems.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and update the shown frame
//! - [`arcadephysics`] – integrate velocities and separate bodies from solid tiles
//! - [`camera`] – follow the camera target and keep the view inside the map
//! - [`cameracontrols`] – pan and zoom the camera from the keyboard
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`playercontroller`] – turn direction keys into player velocity and animation
//! - [`render`] – draw world, overlays and debug information using Raylib
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod arcadephysics;
pub mod camera;
pub mod cameracontrols;
pub mod input;
pub mod playercontroller;
pub mod render;
pub mod time;
