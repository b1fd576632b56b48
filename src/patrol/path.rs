//! Patrol domain: waypoint paths walked back and forth.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered waypoints. Followers walk them first to last, then back again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Vec2>,
}

impl Path {
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Endless ping-pong over the points. Yields nothing for an empty path
    /// and repeats the only point of a single-point path forever.
    pub fn iter(&self) -> PingPong {
        PingPong::new(self.points.clone())
    }

    /// Consecutive point pairs, for drawing.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Owned cursor over a path. Restart it by calling `Path::iter` again.
#[derive(Debug, Clone)]
pub struct PingPong {
    points: Vec<Vec2>,
    index: usize,
    forward: bool,
}

impl PingPong {
    fn new(points: Vec<Vec2>) -> Self {
        Self {
            points,
            index: 0,
            forward: true,
        }
    }
}

impl Iterator for PingPong {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        let point = *self.points.get(self.index)?;
        let last = self.points.len() - 1;
        if last == 0 {
            return Some(point);
        }

        if self.index == 0 {
            self.forward = true;
        } else if self.index >= last {
            self.forward = false;
        }
        if self.forward {
            self.index += 1;
        } else {
            self.index -= 1;
        }
        Some(point)
    }
}
