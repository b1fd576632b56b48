//! Patrol domain: a steerable platform that drives its own body.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::basic::BasicMovementController;
use crate::movement::control::{Controllable, deadzone};
use crate::patrol::follow::move_towards;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlatformJump {
    #[default]
    Grounded,
    /// Launched with collisions off, gravity pulling it back.
    Rising { origin: Vec2 },
    /// Gravity off, sliding back to where the jump began.
    Returning { origin: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub h_movement_speed: f32,
    pub v_movement_speed: f32,
    pub jump_height: f32,
    /// Units per second on the way back to the jump origin
    pub return_speed: f32,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            h_movement_speed: 4.0,
            v_movement_speed: 4.0,
            jump_height: 2.0,
            return_speed: 3.0,
        }
    }
}

/// Floats in place until steered. A jump throws it up through whatever is
/// above, then it glides back down to its starting height.
#[derive(Component, Debug, Clone, Default)]
pub struct PlatformController {
    pub settings: PlatformSettings,
    jump: PlatformJump,
    current_speed: Vec2,
}

impl PlatformController {
    pub fn new(settings: PlatformSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Platforms hover: gravity stays off outside of jumps.
    pub fn attach(&self, body: &mut BasicMovementController) {
        body.set_gravity_active(false);
    }

    pub fn jump_phase(&self) -> PlatformJump {
        self.jump
    }

    pub fn is_jumping(&self) -> bool {
        self.jump != PlatformJump::Grounded
    }

    /// Commanded speed from the last `move_axes`.
    pub fn speed(&self) -> Vec2 {
        self.current_speed
    }

    /// Applies the commanded speeds and advances the jump, once per tick
    /// before the body steps.
    pub fn update(&mut self, body: &mut BasicMovementController, position: Vec2, dt: f32) {
        body.set_horizontal_force(self.current_speed.x);

        match self.jump {
            PlatformJump::Grounded => body.set_vertical_force(self.current_speed.y),
            PlatformJump::Rising { origin } => {
                if body.velocity().y <= 0.0 {
                    body.set_vertical_force(0.0);
                    body.set_gravity_active(false);
                    self.jump = PlatformJump::Returning { origin };
                }
            }
            PlatformJump::Returning { origin } => {
                if position.y > origin.y {
                    let next = move_towards(position, origin, self.settings.return_speed * dt);
                    body.translate(next - position);
                } else {
                    body.collisions_on();
                    self.jump = PlatformJump::Grounded;
                    debug!("Platform back at jump origin {:?}", origin);
                }
            }
        }
    }
}

impl Controllable for PlatformController {
    fn move_axes(&mut self, horizontal: f32, vertical: f32) {
        self.current_speed = Vec2::new(
            deadzone(horizontal) * self.settings.h_movement_speed,
            deadzone(vertical) * self.settings.v_movement_speed,
        );
    }

    fn jump(
        &mut self,
        body: &mut BasicMovementController,
        position: Vec2,
        press: bool,
        _release: bool,
    ) {
        if self.is_jumping() || !press {
            return;
        }

        body.set_gravity_active(true);
        body.collisions_off();
        let launch = (2.0 * self.settings.jump_height * body.current_parameters().gravity.abs()).sqrt();
        body.set_vertical_force(launch);
        self.jump = PlatformJump::Rising { origin: position };
    }
}
