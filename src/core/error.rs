//! Core domain: configuration faults detected at setup.

use bevy::math::Vec2;

/// A configuration that would produce a degenerate ray fan or a stuck
/// ability. Raised at construction time; never during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Collider width or height is zero, negative, or not finite.
    DegenerateCollider { size: Vec2 },
    /// A ray fan needs at least two rays to span an edge.
    TooFewRays { fan: &'static str, count: usize },
    NegativeRayOffset { offset: f32 },
    /// A timed charge system with a non-positive duration never restores.
    NonPositiveDuration { field: &'static str, value: f32 },
    /// A value that must be non-negative (speeds, heights, jump counts).
    Negative { field: &'static str, value: f32 },
    /// The maximum slope angle lies outside 0..=90 degrees.
    SlopeAngleOutOfRange { degrees: f32 },
    /// A scale factor outside `0 < value <= 1`.
    RatioOutOfRange { field: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::DegenerateCollider { size } => {
                write!(f, "collider size {}x{} is degenerate", size.x, size.y)
            }
            ConfigError::TooFewRays { fan, count } => {
                write!(f, "{} ray fan has {} rays, at least 2 required", fan, count)
            }
            ConfigError::NegativeRayOffset { offset } => {
                write!(f, "ray offset {} must not be negative", offset)
            }
            ConfigError::NonPositiveDuration { field, value } => {
                write!(f, "'{}' must be positive, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "'{}' must not be negative, got {}", field, value)
            }
            ConfigError::SlopeAngleOutOfRange { degrees } => {
                write!(f, "maximum slope angle {} is outside 0..=90", degrees)
            }
            ConfigError::RatioOutOfRange { field, value } => {
                write!(f, "'{}' must lie in (0, 1], got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
