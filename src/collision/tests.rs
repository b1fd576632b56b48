//! Collision domain: tests for ray queries against the static world.

use bevy::prelude::*;

use super::{
    Aabb, CastRay, GameLayer, Ladder, StaticWorld, SurfaceId, mask_of, mask_without, walkable_mask,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1.0e-4
}

// -----------------------------------------------------------------------------
// Box queries
// -----------------------------------------------------------------------------

#[test]
fn test_ray_hits_box_top_face() {
    let world = StaticWorld::new().with_box(Vec2::ZERO, Vec2::new(10.0, 2.0), GameLayer::Platform);

    let hit = world
        .cast_ray(Vec2::new(0.0, 5.0), Dir2::NEG_Y, 10.0, walkable_mask())
        .expect("ray should hit the box");

    assert!(approx(hit.distance, 4.0));
    assert!(approx(hit.point.y, 1.0));
    assert_eq!(hit.normal, Vec2::Y);
    assert_eq!(hit.surface.id, SurfaceId::Static(0));
}

#[test]
fn test_ray_stops_short_of_box() {
    let world = StaticWorld::new().with_box(Vec2::ZERO, Vec2::new(10.0, 2.0), GameLayer::Platform);
    assert!(
        world
            .cast_ray(Vec2::new(0.0, 5.0), Dir2::NEG_Y, 3.9, walkable_mask())
            .is_none()
    );
}

#[test]
fn test_ray_from_inside_reports_zero_distance() {
    let world = StaticWorld::new().with_box(Vec2::ZERO, Vec2::new(10.0, 2.0), GameLayer::Platform);
    let hit = world
        .cast_ray(Vec2::ZERO, Dir2::X, 1.0, walkable_mask())
        .expect("origin inside should hit");
    assert_eq!(hit.distance, 0.0);
}

#[test]
fn test_ray_grazing_box_edge_misses() {
    let world = StaticWorld::new().with_box(Vec2::ZERO, Vec2::new(2.0, 2.0), GameLayer::Platform);
    // Travels exactly along the left face.
    assert!(
        world
            .cast_ray(Vec2::new(-1.0, 5.0), Dir2::NEG_Y, 10.0, walkable_mask())
            .is_none()
    );
}

#[test]
fn test_closest_hit_wins() {
    let world = StaticWorld::new()
        .with_box(Vec2::new(0.0, -10.0), Vec2::new(4.0, 2.0), GameLayer::Platform)
        .with_box(Vec2::new(0.0, -4.0), Vec2::new(4.0, 2.0), GameLayer::Platform);

    let hit = world
        .cast_ray(Vec2::ZERO, Dir2::NEG_Y, 20.0, walkable_mask())
        .unwrap();
    assert_eq!(hit.surface.id, SurfaceId::Static(1));
    assert!(approx(hit.distance, 3.0));
}

// -----------------------------------------------------------------------------
// Edges and masks
// -----------------------------------------------------------------------------

#[test]
fn test_slope_edge_normal_faces_ray() {
    let world = StaticWorld::new().with_edge(
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 10.0),
        GameLayer::Platform,
    );

    let hit = world
        .cast_ray(Vec2::new(-1.0, 2.0), Dir2::X, 10.0, walkable_mask())
        .unwrap();
    assert!(approx(hit.distance, 3.0));
    assert!(hit.normal.x < 0.0 && hit.normal.y > 0.0);
    assert!(approx(hit.normal.angle_to(Vec2::Y).abs().to_degrees(), 45.0));
}

#[test]
fn test_parallel_edge_is_ignored() {
    let world = StaticWorld::new().with_edge(
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        GameLayer::OneWayPlatform,
    );
    assert!(
        world
            .cast_ray(Vec2::new(-5.0, 0.0), Dir2::X, 20.0, walkable_mask())
            .is_none()
    );
}

#[test]
fn test_mask_filters_layers() {
    let world = StaticWorld::new().with_edge(
        Vec2::new(-5.0, 0.0),
        Vec2::new(5.0, 0.0),
        GameLayer::OneWayPlatform,
    );
    let solid_only = mask_without(walkable_mask(), GameLayer::OneWayPlatform);

    assert!(
        world
            .cast_ray(Vec2::new(0.0, 1.0), Dir2::NEG_Y, 2.0, solid_only)
            .is_none()
    );
    assert!(
        world
            .cast_ray(Vec2::new(0.0, 1.0), Dir2::NEG_Y, 2.0, walkable_mask())
            .is_some()
    );
    assert!(
        world
            .cast_ray(Vec2::new(0.0, 1.0), Dir2::NEG_Y, 2.0, mask_of(&[]))
            .is_none()
    );
}

#[test]
fn test_surface_velocity_is_reported() {
    let mut world = StaticWorld::new();
    let id = world.add_box(Vec2::ZERO, Vec2::new(4.0, 1.0), GameLayer::MovingPlatform);
    world.set_velocity(id, Vec2::new(2.0, 0.0));

    let hit = world
        .cast_ray(Vec2::new(0.0, 3.0), Dir2::NEG_Y, 5.0, walkable_mask())
        .unwrap();
    assert_eq!(hit.surface.layer, GameLayer::MovingPlatform);
    assert_eq!(hit.surface.velocity, Vec2::new(2.0, 0.0));
}

#[test]
fn test_aabb_overlap_is_strict() {
    let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(2.0));
    let touching = Aabb::from_center_size(Vec2::new(2.0, 0.0), Vec2::splat(2.0));
    let overlapping = Aabb::from_center_size(Vec2::new(1.5, 0.0), Vec2::splat(2.0));
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&overlapping));
}

// -----------------------------------------------------------------------------
// Ladder zones
// -----------------------------------------------------------------------------

#[test]
fn test_ladder_contact_inside_and_on_top() {
    let ladder = Ladder {
        size: Vec2::new(1.0, 6.0),
        top_height: 0.5,
    };
    let center = Vec2::new(0.0, 3.0);

    // Halfway up the shaft.
    let climbing = Aabb::from_center_size(Vec2::new(0.0, 2.0), Vec2::new(1.0, 2.0));
    assert_eq!(ladder.contact(center, &climbing), (true, false));

    // Standing on the ledge the ladder leads to.
    let on_ledge = Aabb::from_center_size(Vec2::new(0.0, 7.0), Vec2::new(1.0, 2.0));
    assert_eq!(ladder.contact(center, &on_ledge), (true, true));

    let beside = Aabb::from_center_size(Vec2::new(3.0, 2.0), Vec2::new(1.0, 2.0));
    assert_eq!(ladder.contact(center, &beside), (false, false));
}
