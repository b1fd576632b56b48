//! Movement domain: the capability shared by everything a player can steer.

use bevy::prelude::*;

use crate::movement::basic::BasicMovementController;

/// Something that turns axes and jump presses into force commands on its
/// own body.
pub trait Controllable {
    fn move_axes(&mut self, horizontal: f32, vertical: f32);

    /// `position` is the body's current position, for controllers that
    /// remember where a jump started.
    fn jump(
        &mut self,
        body: &mut BasicMovementController,
        position: Vec2,
        press: bool,
        release: bool,
    );
}

/// Marks the body that currently receives player input.
#[derive(Component, Debug, Default)]
pub struct Controlled;

/// Axis value with the ±0.1 deadzone applied.
pub fn deadzone(value: f32) -> f32 {
    if value.abs() > AXIS_DEADZONE {
        value
    } else {
        0.0
    }
}

pub const AXIS_DEADZONE: f32 = 0.1;
