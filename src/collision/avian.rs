//! Collision domain: raycast service backed by Avian's spatial query pipeline.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::collision::{CastRay, Platform, RayHit, Surface, SurfaceId};

/// Adapts `SpatialQuery` to `CastRay`. The body being stepped is excluded so
/// a platform driving its own controller never hits itself.
pub struct AvianRaycaster<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    platforms: &'a dyn Fn(Entity) -> Option<Platform>,
    exclude: Option<Entity>,
}

impl<'a, 'w, 's> AvianRaycaster<'a, 'w, 's> {
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        platforms: &'a dyn Fn(Entity) -> Option<Platform>,
    ) -> Self {
        Self {
            spatial_query,
            platforms,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl CastRay for AvianRaycaster<'_, '_, '_> {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if mask.0 == 0 {
            return None;
        }

        let mut filter = SpatialQueryFilter::from_mask(mask);
        if let Some(entity) = self.exclude {
            filter = filter.with_excluded_entities([entity]);
        }

        let hit = self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)?;
        let platform = (self.platforms)(hit.entity).unwrap_or_default();

        Some(RayHit {
            distance: hit.distance,
            point: origin + direction.as_vec2() * hit.distance,
            normal: hit.normal,
            surface: Surface {
                id: SurfaceId::Entity(hit.entity),
                layer: platform.layer,
                velocity: platform.velocity,
            },
        })
    }
}
