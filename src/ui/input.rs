//! Input handling systems

use bevy::prelude::*;

use crate::simulation::InputState;

/// Sample race controls from the keyboard
pub fn race_input(keyboard: &ButtonInput<KeyCode>) -> InputState {
    InputState {
        accelerate: keyboard.pressed(KeyCode::ArrowUp),
        brake: keyboard.pressed(KeyCode::ArrowDown),
        steer_left: keyboard.pressed(KeyCode::ArrowLeft),
        steer_right: keyboard.pressed(KeyCode::ArrowRight),
        handbrake: keyboard.pressed(KeyCode::Space),
        reload_requested: keyboard.just_pressed(KeyCode::KeyR),
    }
}

/// Handle basic keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
