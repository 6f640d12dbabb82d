//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - Pressing the debug key triggers
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent); only
//!   scenes that registered the observer react to it.
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for binding in input.bindings_mut() {
        let key = binding.key_binding;
        binding.update(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
    }

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
