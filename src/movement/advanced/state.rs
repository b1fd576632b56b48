//! Advanced movement: ability flags and the per-tick movement phase.

use bevy::prelude::*;

use crate::movement::basic::CollisionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// What the character is doing right now. Rebuilt from the flags every tick,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPhase {
    GroundedIdle,
    GroundedMoving,
    AirborneAscending,
    AirborneDescending,
    Climbing,
    Dashing,
    Diving,
    WallClinging,
    Broadcasting,
    Recalling,
}

impl MovementPhase {
    /// Exclusive modes win over contact-derived phases.
    pub fn resolve(
        abilities: &AdvancedMovementState,
        collisions: &CollisionState,
        velocity: Vec2,
    ) -> Self {
        if abilities.recalling {
            MovementPhase::Recalling
        } else if abilities.broadcasting {
            MovementPhase::Broadcasting
        } else if abilities.dashing {
            MovementPhase::Dashing
        } else if abilities.diving {
            MovementPhase::Diving
        } else if abilities.ladder_climbing {
            MovementPhase::Climbing
        } else if abilities.wall_clinging {
            MovementPhase::WallClinging
        } else if collisions.is_grounded() {
            if velocity.x.abs() > 0.0 {
                MovementPhase::GroundedMoving
            } else {
                MovementPhase::GroundedIdle
            }
        } else if velocity.y > 0.0 {
            MovementPhase::AirborneAscending
        } else {
            MovementPhase::AirborneDescending
        }
    }
}

/// Ability flags owned by one `AdvancedMovementController`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedMovementState {
    pub can_jump: bool,
    pub can_dash: bool,
    pub can_move_freely: bool,
    pub number_of_jumps_left: i32,

    pub dashing: bool,
    pub running: bool,
    pub crouching: bool,
    pub crouching_previously: bool,
    pub wall_clinging: bool,
    pub diving: bool,

    pub ladder_colliding: bool,
    pub ladder_top_colliding: bool,
    pub ladder_climbing: bool,
    pub ladder_climbing_speed: f32,

    pub broadcasting: bool,
    pub broadcasting_previously: bool,
    pub recalling: bool,
    pub recalling_previously: bool,

    /// Set by a jump, cleared once the character starts falling
    pub jumping: bool,
    pub facing: Facing,
}

impl AdvancedMovementState {
    /// Resets every ability to its baseline. Facing is kept.
    pub fn initialize(&mut self, number_of_jumps: i32) {
        *self = Self {
            can_jump: true,
            can_dash: true,
            can_move_freely: true,
            number_of_jumps_left: number_of_jumps,
            facing: self.facing,
            ..Default::default()
        };
    }
}
