//! Collision domain: layers, the raycast service, and its two backends.

mod avian;
mod layers;
mod query;
mod world;

#[cfg(test)]
mod tests;

pub use avian::AvianRaycaster;
pub use layers::{
    GameLayer, Ladder, Platform, mask_contains, mask_of, mask_without, walkable_mask,
};
pub use query::{CastRay, RayHit, Surface, SurfaceId};
pub use world::{Aabb, Segment, Shape, StaticBody, StaticWorld};
