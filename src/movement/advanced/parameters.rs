//! Advanced movement: ability tunables and the permission set.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Where the character is allowed to start a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpBehavior {
    CanJumpOnGround,
    /// Jumps while airborne draw from the jump counter
    #[default]
    CanJumpAnywhere,
    CantJump,
    /// Ignores the jump counter entirely
    CanJumpAnywhereAnyNumberOfTimes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedMovementParameters {
    /// Accelerate toward the target speed instead of snapping to it
    pub smooth_movement: bool,

    pub jump_height: f32,
    /// Airtime before a released jump button may cut the ascent short
    pub jump_minimum_air_time: f32,
    /// 0: no jump, 1: normal jump, 2: double jump, etc.
    pub number_of_jumps: i32,
    pub jump_restrictions: JumpBehavior,
    pub jump_is_proportional_to_the_press_time: bool,

    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    /// Walk speed while broadcasting or recalling
    pub broadcast_walk_speed: f32,
    /// Free vertical movement speed, only used when `v_move_enabled`
    pub v_movement_speed: f32,
    pub ladder_speed: f32,

    /// Seconds
    pub dash_duration: f32,
    /// Horizontal force added every tick of the dash
    pub dash_force: f32,
    /// Seconds between the end of a dash and the next charge
    pub dash_cooldown: f32,

    pub wall_jump_force: f32,
    pub wall_clinging_slow_factor: f32,

    /// Crouched collider height as a fraction of the standing height
    pub crouch_height_ratio: f32,
}

impl Default for AdvancedMovementParameters {
    fn default() -> Self {
        Self {
            smooth_movement: true,
            jump_height: 3.025,
            jump_minimum_air_time: 0.1,
            number_of_jumps: 3,
            jump_restrictions: JumpBehavior::default(),
            jump_is_proportional_to_the_press_time: true,
            walk_speed: 8.0,
            run_speed: 16.0,
            crouch_speed: 4.0,
            broadcast_walk_speed: 2.0,
            v_movement_speed: 8.0,
            ladder_speed: 2.0,
            dash_duration: 0.15,
            dash_force: 5.0,
            dash_cooldown: 2.0,
            wall_jump_force: 3.0,
            wall_clinging_slow_factor: 0.6,
            crouch_height_ratio: 0.5,
        }
    }
}

impl AdvancedMovementParameters {
    pub fn validate(&self, errors: &mut Vec<ConfigError>) {
        for (field, value) in [
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
        ] {
            if value.is_nan() || value <= 0.0 {
                errors.push(ConfigError::NonPositiveDuration { field, value });
            }
        }

        for (field, value) in [
            ("jump_height", self.jump_height),
            ("jump_minimum_air_time", self.jump_minimum_air_time),
            ("number_of_jumps", self.number_of_jumps as f32),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("broadcast_walk_speed", self.broadcast_walk_speed),
            ("v_movement_speed", self.v_movement_speed),
            ("ladder_speed", self.ladder_speed),
            ("dash_force", self.dash_force),
            ("wall_jump_force", self.wall_jump_force),
            ("wall_clinging_slow_factor", self.wall_clinging_slow_factor),
        ] {
            if value < 0.0 {
                errors.push(ConfigError::Negative { field, value });
            }
        }

        if !(self.crouch_height_ratio > 0.0 && self.crouch_height_ratio <= 1.0) {
            errors.push(ConfigError::RatioOutOfRange {
                field: "crouch_height_ratio",
                value: self.crouch_height_ratio,
            });
        }
    }
}

/// Abilities the character may ever use. Unlock them at start or in game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedMovementPermissions {
    pub run_enabled: bool,
    pub dash_enabled: bool,
    pub jump_enabled: bool,
    pub crouch_enabled: bool,
    pub wall_jump_enabled: bool,
    pub wall_clinging_enabled: bool,
    pub broadcast_enabled: bool,
    pub h_move_enabled: bool,
    /// Free vertical movement; off for gravity-bound characters
    pub v_move_enabled: bool,
}

impl Default for AdvancedMovementPermissions {
    fn default() -> Self {
        Self {
            run_enabled: true,
            dash_enabled: true,
            jump_enabled: true,
            crouch_enabled: true,
            wall_jump_enabled: true,
            wall_clinging_enabled: true,
            broadcast_enabled: true,
            h_move_enabled: true,
            v_move_enabled: false,
        }
    }
}
