//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

/// One tick of player intent: two axes in -1..1 and discrete actions.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub run_held: bool,
    pub dash_just_pressed: bool,
    /// Broadcast trigger axis, active above zero
    pub broadcast: f32,
    /// Recall trigger axis, active above zero
    pub recall: f32,
}

impl MovementInput {
    pub fn with_axis(x: f32, y: f32) -> Self {
        Self {
            axis: Vec2::new(x, y),
            ..Default::default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump_just_pressed: true,
            ..Default::default()
        }
    }
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (ladders, crouch, drop-through, dive)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_just_released =
        keyboard.just_released(KeyCode::Space) || keyboard.just_released(KeyCode::KeyK);
    input.run_held = keyboard.pressed(KeyCode::ShiftLeft);
    input.dash_just_pressed =
        keyboard.just_pressed(KeyCode::KeyJ) || keyboard.just_pressed(KeyCode::KeyL);
    input.broadcast = if keyboard.pressed(KeyCode::KeyE) { 1.0 } else { 0.0 };
    input.recall = if keyboard.pressed(KeyCode::KeyQ) { 1.0 } else { 0.0 };
}
