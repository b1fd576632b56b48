//! Collision domain: physics layers and platform markers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::collision::Aabb;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid ground and walls
    Platform,
    /// Edge platforms that block from above and can be dropped through
    OneWayPlatform,
    /// Platforms moved by a path or a controller
    MovingPlatform,
    /// Ladder trigger zones - never block movement
    Ladder,
    /// Characters driven by the raycast controller
    Character,
}

/// Every layer a character can stand on.
pub fn walkable_mask() -> LayerMask {
    mask_of(&[
        GameLayer::Platform,
        GameLayer::OneWayPlatform,
        GameLayer::MovingPlatform,
    ])
}

pub fn mask_of(layers: &[GameLayer]) -> LayerMask {
    LayerMask(layers.iter().fold(0, |bits, layer| bits | layer.to_bits()))
}

pub fn mask_without(mask: LayerMask, layer: GameLayer) -> LayerMask {
    LayerMask(mask.0 & !layer.to_bits())
}

pub fn mask_contains(mask: LayerMask, layer: GameLayer) -> bool {
    mask.0 & layer.to_bits() != 0
}

/// Attached to every collider the character controller can stand on.
/// The velocity is written by whatever moves the platform and carries riders.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Platform {
    pub layer: GameLayer,
    pub velocity: Vec2,
}

impl Platform {
    pub fn new(layer: GameLayer) -> Self {
        Self {
            layer,
            velocity: Vec2::ZERO,
        }
    }
}

/// Rectangular ladder zone centred on the entity's transform.
/// A strip `top_height` deep on either side of the top edge counts as the
/// ladder top, so a body standing on the ledge above still touches it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ladder {
    pub size: Vec2,
    pub top_height: f32,
}

impl Ladder {
    pub fn zone(&self, center: Vec2) -> Aabb {
        Aabb::from_center_size(center, self.size)
    }

    pub fn top_zone(&self, center: Vec2) -> Aabb {
        let top = center.y + self.size.y * 0.5;
        Aabb::from_center_size(
            Vec2::new(center.x, top),
            Vec2::new(self.size.x, self.top_height * 2.0),
        )
    }

    /// Returns `(colliding, top_colliding)` for a body occupying `bounds`.
    pub fn contact(&self, center: Vec2, bounds: &Aabb) -> (bool, bool) {
        let top = self.top_zone(center).overlaps(bounds);
        (top || self.zone(center).overlaps(bounds), top)
    }
}
