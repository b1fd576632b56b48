//! Patrol domain: moving an entity along a path.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::patrol::{Path, PingPong};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FollowType {
    /// Constant speed toward the waypoint
    #[default]
    MoveTowards,
    /// Exponential smoothing toward the waypoint
    Lerp,
}

#[derive(Component, Debug, Clone)]
pub struct PathFollow {
    pub follow_type: FollowType,
    pub speed: f32,
    pub max_distance_to_goal: f32,
    /// Displacement of the last advance divided by its dt.
    pub current_speed: Vec2,
    cursor: PingPong,
    target: Option<Vec2>,
}

impl PathFollow {
    pub fn new(path: &Path, follow_type: FollowType, speed: f32) -> Self {
        let mut cursor = path.iter();
        let target = cursor.next();
        Self {
            follow_type,
            speed,
            max_distance_to_goal: 0.1,
            current_speed: Vec2::ZERO,
            cursor,
            target,
        }
    }

    /// Where the follower is placed when it starts: the first waypoint.
    pub fn start_position(&self) -> Option<Vec2> {
        self.target
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Moves `position` toward the current waypoint and returns the result.
    /// Switches to the next waypoint once inside the tolerance.
    pub fn advance(&mut self, position: Vec2, dt: f32) -> Vec2 {
        let Some(target) = self.target else {
            self.current_speed = Vec2::ZERO;
            return position;
        };

        let next = match self.follow_type {
            FollowType::MoveTowards => move_towards(position, target, self.speed * dt),
            FollowType::Lerp => position.lerp(target, (self.speed * dt).min(1.0)),
        };

        if next.distance_squared(target) < self.max_distance_to_goal * self.max_distance_to_goal {
            self.target = self.cursor.next();
        }

        self.current_speed = if dt > 0.0 {
            (next - position) / dt
        } else {
            Vec2::ZERO
        };
        next
    }
}

/// Steps from `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to_target / distance * max_delta
    }
}
