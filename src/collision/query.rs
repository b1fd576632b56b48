//! Collision domain: the raycast service the movement core depends on.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::collision::GameLayer;

/// Identity of the collider a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceId {
    Entity(Entity),
    /// Index of a body in a `StaticWorld`
    Static(usize),
}

/// What a character touches: which object, on which layer, moving how fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub id: SurfaceId,
    pub layer: GameLayer,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec2,
    /// Unit normal of the surface, facing against the ray
    pub normal: Vec2,
    pub surface: Surface,
}

/// Nearest-hit ray query against the level geometry.
///
/// A ray whose origin lies inside a collider reports a hit at distance 0.
/// An empty mask never hits anything.
pub trait CastRay {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

impl<T: CastRay + ?Sized> CastRay for &T {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        (**self).cast_ray(origin, direction, max_distance, mask)
    }
}
