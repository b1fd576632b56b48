//! Dev domain: ray fan and patrol route overlays.

use bevy::prelude::*;

use crate::dev::{DevSettings, PatrolRoute};
use crate::movement::basic::BasicMovementController;

const HIT: Color = Color::srgb(0.3, 0.9, 0.3);
const MISS: Color = Color::srgb(0.9, 0.3, 0.3);

/// Spread `count` origins evenly from `a` to `b`.
fn fan(a: Vec2, b: Vec2, count: usize) -> impl Iterator<Item = Vec2> {
    let last = count.saturating_sub(1).max(1) as f32;
    (0..count).map(move |i| a.lerp(b, i as f32 / last))
}

pub(crate) fn draw_ray_fans(
    settings: Res<DevSettings>,
    bodies: Query<(&Transform, &BasicMovementController)>,
    mut gizmos: Gizmos,
) {
    if !settings.show_rays {
        return;
    }

    for (transform, body) in &bodies {
        let bounds = body.ray_bounds(transform.translation.truncate());
        let rays = body.rays();
        let state = body.state();
        let reach = rays.ray_offset * 4.0;

        let below = if state.colliding_below { HIT } else { MISS };
        for origin in fan(bounds.min, Vec2::new(bounds.max.x, bounds.min.y), rays.vertical_rays) {
            gizmos.line_2d(origin, origin - Vec2::Y * reach, below);
        }
        let above = if state.colliding_above { HIT } else { MISS };
        for origin in fan(Vec2::new(bounds.min.x, bounds.max.y), bounds.max, rays.vertical_rays) {
            gizmos.line_2d(origin, origin + Vec2::Y * reach, above);
        }

        let left = if state.colliding_left { HIT } else { MISS };
        for origin in fan(bounds.min, Vec2::new(bounds.min.x, bounds.max.y), rays.horizontal_rays) {
            gizmos.line_2d(origin, origin - Vec2::X * reach, left);
        }
        let right = if state.colliding_right { HIT } else { MISS };
        for origin in fan(Vec2::new(bounds.max.x, bounds.min.y), bounds.max, rays.horizontal_rays) {
            gizmos.line_2d(origin, origin + Vec2::X * reach, right);
        }
    }
}

pub(crate) fn draw_patrol_routes(
    settings: Res<DevSettings>,
    routes: Query<&PatrolRoute>,
    mut gizmos: Gizmos,
) {
    if !settings.show_rays {
        return;
    }

    for route in &routes {
        for (a, b) in route.0.segments() {
            gizmos.line_2d(a, b, Color::srgb(0.4, 0.6, 0.9));
        }
    }
}
