//! Basic movement: tunables for gravity, acceleration, speed caps, and ray fans.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Gravity, slope limit, and speed dampening factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicMovementParameters {
    pub gravity: f32,
    /// Speed factor on the ground
    pub ground_acceleration: f32,
    /// Speed factor in the air
    pub air_acceleration: f32,
    /// Per-axis velocity cap, prevents runaway speed on slopes
    pub max_velocity_x: f32,
    pub max_velocity_y: f32,
    /// Maximum angle (in degrees) the character can walk on
    pub maximum_slope_angle: f32,
}

impl Default for BasicMovementParameters {
    fn default() -> Self {
        Self {
            gravity: -15.0,
            ground_acceleration: 20.0,
            air_acceleration: 5.0,
            max_velocity_x: 200.0,
            max_velocity_y: 200.0,
            maximum_slope_angle: 45.0,
        }
    }
}

impl BasicMovementParameters {
    pub fn max_velocity(&self) -> Vec2 {
        Vec2::new(self.max_velocity_x, self.max_velocity_y)
    }

    pub fn validate(&self, errors: &mut Vec<ConfigError>) {
        if !(0.0..=90.0).contains(&self.maximum_slope_angle) {
            errors.push(ConfigError::SlopeAngleOutOfRange {
                degrees: self.maximum_slope_angle,
            });
        }
        for (field, value) in [
            ("max_velocity_x", self.max_velocity_x),
            ("max_velocity_y", self.max_velocity_y),
            ("ground_acceleration", self.ground_acceleration),
            ("air_acceleration", self.air_acceleration),
        ] {
            if value < 0.0 {
                errors.push(ConfigError::Negative { field, value });
            }
        }
    }
}

/// Number and spacing of the collision probes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaySettings {
    pub horizontal_rays: usize,
    pub vertical_rays: usize,
    pub ray_offset: f32,
}

impl Default for RaySettings {
    fn default() -> Self {
        Self {
            horizontal_rays: 8,
            vertical_rays: 8,
            ray_offset: 0.05,
        }
    }
}

impl RaySettings {
    pub fn validate(&self, errors: &mut Vec<ConfigError>) {
        if self.horizontal_rays < 2 {
            errors.push(ConfigError::TooFewRays {
                fan: "horizontal",
                count: self.horizontal_rays,
            });
        }
        if self.vertical_rays < 2 {
            errors.push(ConfigError::TooFewRays {
                fan: "vertical",
                count: self.vertical_rays,
            });
        }
        if self.ray_offset.is_nan() || self.ray_offset < 0.0 {
            errors.push(ConfigError::NegativeRayOffset {
                offset: self.ray_offset,
            });
        }
    }
}

/// The character's box collider, relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderBox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for ColliderBox {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 2.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ColliderBox {
    pub fn new(size: Vec2) -> Self {
        Self {
            width: size.x,
            height: size.y,
            ..Default::default()
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    pub fn validate(&self, errors: &mut Vec<ConfigError>) {
        let size = self.size();
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            errors.push(ConfigError::DegenerateCollider { size });
        }
    }
}
