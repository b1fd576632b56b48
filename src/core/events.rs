//! Core domain: movement events emitted after each physics tick.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired on the tick a body's downward contact goes from false to true.
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
    pub impact_speed: f32,
}

impl Message for LandedEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Air,
    Wall,
    DropThrough,
}

/// Fired when a character starts a jump (or drops through a platform).
#[derive(Debug)]
pub struct JumpedEvent {
    pub entity: Entity,
    pub kind: JumpKind,
    pub jumps_left: i32,
}

impl Message for JumpedEvent {}

/// Fired when a dash or a dive begins.
#[derive(Debug)]
pub struct DashStartedEvent {
    pub entity: Entity,
    pub dive: bool,
}

impl Message for DashStartedEvent {}
