//! Advanced movement: the per-tick animation parameter frame.

use std::collections::HashMap;

use bevy::prelude::*;

/// Receiver of named animator parameters.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_float(&mut self, name: &'static str, value: f32);
}

/// Everything an animator needs about one tick of movement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationFrame {
    pub grounded: bool,
    pub speed: f32,
    pub v_speed: f32,
    pub running: bool,
    pub dashing: bool,
    pub crouching: bool,
    pub wall_clinging: bool,
    pub diving: bool,
    pub ladder_climbing: bool,
    pub ladder_climbing_speed: f32,
    pub is_moving: bool,
    pub is_jumping: bool,
    pub is_falling: bool,
    pub is_broadcasting: bool,
}

impl AnimationFrame {
    pub fn apply(&self, sink: &mut impl AnimationSink) {
        sink.set_bool("Grounded", self.grounded);
        sink.set_float("Speed", self.speed);
        sink.set_float("vSpeed", self.v_speed);
        sink.set_bool("Running", self.running);
        sink.set_bool("Dashing", self.dashing);
        sink.set_bool("Crouching", self.crouching);
        sink.set_bool("WallClinging", self.wall_clinging);
        sink.set_bool("Diving", self.diving);
        sink.set_bool("LadderClimbing", self.ladder_climbing);
        sink.set_float("LadderClimbingSpeed", self.ladder_climbing_speed);
        sink.set_bool("isMoving", self.is_moving);
        sink.set_bool("isJumping", self.is_jumping);
        sink.set_bool("isFalling", self.is_falling);
        sink.set_bool("isBroadcasting", self.is_broadcasting);
    }
}

/// Last values pushed for a character; read by whatever draws it.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParameters {
    pub bools: HashMap<&'static str, bool>,
    pub floats: HashMap<&'static str, f32>,
}

impl AnimatorParameters {
    pub fn bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }
}

impl AnimationSink for AnimatorParameters {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }
}
