//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the scenes care about and exposes it
//! to systems via the [`InputState`] resource. Arrow keys drive the player or
//! pan the camera, `A`/`E` zoom and `D` toggles the debug overlay.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    /// Inactive state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }

    /// Write this frame's hardware readings.
    pub fn update(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

/// Resource capturing the per-frame keyboard state relevant to the scenes.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub direction_left: BoolState,
    pub direction_right: BoolState,
    pub direction_up: BoolState,
    pub direction_down: BoolState,
    pub zoom_in: BoolState,
    pub zoom_out: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            direction_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            direction_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            direction_up: BoolState::bound(KeyboardKey::KEY_UP),
            direction_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            zoom_in: BoolState::bound(KeyboardKey::KEY_A),
            zoom_out: BoolState::bound(KeyboardKey::KEY_E),
            mode_debug: BoolState::bound(KeyboardKey::KEY_D),
        }
    }
}

impl InputState {
    /// Mutable access to every binding, for the polling system.
    pub fn bindings_mut(&mut self) -> [&mut BoolState; 7] {
        [
            &mut self.direction_left,
            &mut self.direction_right,
            &mut self.direction_up,
            &mut self.direction_down,
            &mut self.zoom_in,
            &mut self.zoom_out,
            &mut self.mode_debug,
        ]
    }
}
