//! Basic movement: tests for gravity integration and the ray sweeps.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    BasicMovementController, BasicMovementParameters, ColliderBox, CollisionState, RaySettings,
};
use crate::collision::{GameLayer, StaticWorld};
use crate::core::ConfigError;

const DT: f32 = 1.0 / 60.0;

fn body() -> BasicMovementController {
    BasicMovementController::new(
        BasicMovementParameters::default(),
        ColliderBox::new(Vec2::new(1.0, 2.0)),
        RaySettings::default(),
    )
    .expect("default configuration is valid")
}

/// Solid floor whose top surface is y = 0.
fn flat_ground() -> StaticWorld {
    StaticWorld::new().with_box(
        Vec2::new(0.0, -0.5),
        Vec2::new(40.0, 1.0),
        GameLayer::Platform,
    )
}

fn run(
    body: &mut BasicMovementController,
    mut position: Vec2,
    world: &StaticWorld,
    ticks: usize,
) -> Vec2 {
    for _ in 0..ticks {
        position = body.step(position, DT, world);
    }
    position
}

// -----------------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------------

#[test]
fn test_degenerate_collider_is_rejected() {
    let result = BasicMovementController::new(
        BasicMovementParameters::default(),
        ColliderBox::new(Vec2::new(0.0, 2.0)),
        RaySettings::default(),
    );
    assert!(matches!(
        result,
        Err(ConfigError::DegenerateCollider { .. })
    ));
}

#[test]
fn test_single_ray_fan_is_rejected() {
    let rays = RaySettings {
        vertical_rays: 1,
        ..Default::default()
    };
    let result = BasicMovementController::new(
        BasicMovementParameters::default(),
        ColliderBox::default(),
        rays,
    );
    assert_eq!(
        result.err(),
        Some(ConfigError::TooFewRays {
            fan: "vertical",
            count: 1
        })
    );
}

#[test]
fn test_override_parameters_take_precedence() {
    let mut body = body();
    assert_eq!(body.current_parameters().gravity, -15.0);

    body.set_override_parameters(Some(BasicMovementParameters {
        gravity: -30.0,
        ..Default::default()
    }));
    assert_eq!(body.effective_gravity(), -30.0);

    body.set_override_parameters(None);
    assert_eq!(body.effective_gravity(), -15.0);
}

// -----------------------------------------------------------------------------
// Free fall
// -----------------------------------------------------------------------------

#[test]
fn test_free_fall_matches_integration() {
    let world = StaticWorld::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let mut body = body();
        let mut position = Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(0.0..50.0));
        let start = Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
        body.set_force(start);

        let mut expected_velocity = start;
        let mut expected_position = position;
        for _ in 0..90 {
            expected_velocity.y += -15.0 * DT;
            expected_position += expected_velocity * DT;
            position = body.step(position, DT, &world);
        }

        assert!(position.distance(expected_position) < 1.0e-2);
        assert!(body.velocity().distance(expected_velocity) < 1.0e-2);
        let state = body.state();
        assert!(!state.colliding_below && !state.colliding_above);
        assert!(!state.colliding_left && !state.colliding_right);
    }
}

#[test]
fn test_free_fall_matches_closed_form() {
    let world = StaticWorld::new();
    let mut body = body();
    let ticks = 120;

    let position = run(&mut body, Vec2::ZERO, &world, ticks);

    // Velocity is integrated before position: y = g * dt^2 * n(n+1)/2.
    let n = ticks as f32;
    let expected = -15.0 * DT * DT * n * (n + 1.0) / 2.0;
    assert!((position.y - expected).abs() < 1.0e-2);
}

#[test]
fn test_slow_fall_scales_vertical_velocity() {
    let world = StaticWorld::new();
    let mut body = body();
    body.set_vertical_force(-6.0);
    body.slow_fall(0.5);

    body.step(Vec2::ZERO, DT, &world);

    assert!((body.velocity().y - (-6.0 - 15.0 * DT) * 0.5).abs() < 1.0e-5);
}

#[test]
fn test_velocity_is_clamped_per_axis() {
    let world = StaticWorld::new();
    let mut body = body();
    body.set_force(Vec2::new(500.0, -500.0));

    body.step(Vec2::ZERO, DT, &world);

    assert_eq!(body.velocity(), Vec2::new(200.0, -200.0));
}

// -----------------------------------------------------------------------------
// Ground contact
// -----------------------------------------------------------------------------

#[test]
fn test_lands_exactly_on_surface() {
    let world = flat_ground();
    let mut body = body();

    let position = run(&mut body, Vec2::new(0.0, 3.0), &world, 120);

    assert!(body.state().is_grounded());
    assert!((position.y - 1.0).abs() < 1.0e-4);
    assert!(body.velocity().y.abs() < 1.0e-3);
}

#[test]
fn test_just_got_grounded_fires_once_per_landing() {
    let world = flat_ground();
    let mut body = body();
    let mut position = Vec2::new(0.0, 3.0);
    let mut landings = 0;
    let mut previous_below = false;

    for tick in 0..400 {
        if tick == 150 {
            body.set_vertical_force(8.0);
        }
        position = body.step(position, DT, &world);

        let state = body.state();
        if state.just_got_grounded {
            landings += 1;
            assert!(!previous_below);
            assert!(state.colliding_below);
        }
        previous_below = state.colliding_below;
    }

    assert_eq!(landings, 2);
}

#[test]
fn test_empty_mask_never_grounds() {
    let world = flat_ground();
    let mut body = body().with_platform_mask(LayerMask(0));

    let position = run(&mut body, Vec2::new(0.0, 3.0), &world, 120);

    assert!(!body.state().is_grounded());
    assert!(position.y < 0.0);
}

#[test]
fn test_upward_impulse_leaves_ground() {
    let world = flat_ground();
    let mut body = body();
    let position = run(&mut body, Vec2::new(0.0, 1.0), &world, 5);
    assert!(body.state().is_grounded());

    body.set_vertical_force(9.0);
    let after = body.step(position, DT, &world);

    assert!(!body.state().is_grounded());
    assert!(after.y > position.y);
}

// -----------------------------------------------------------------------------
// Side contact
// -----------------------------------------------------------------------------

#[test]
fn test_wall_clamps_displacement_and_zeroes_velocity() {
    let world = flat_ground().with_box(
        Vec2::new(3.5, 5.0),
        Vec2::new(1.0, 10.0),
        GameLayer::Platform,
    );
    let mut body = body();
    let mut position = Vec2::new(0.0, 1.0);
    let mut touched = false;

    for _ in 0..120 {
        body.set_horizontal_force(10.0);
        position = body.step(position, DT, &world);
        // Right edge never passes the wall face minus twice the ray offset.
        assert!(position.x <= 2.4 + 1.0e-4);
        touched |= body.state().colliding_right;
    }

    assert!(touched);
    assert!((position.x - 2.4).abs() < 1.0e-4);
    assert!(body.velocity().x.abs() < 1.0e-3);
}

#[test]
fn test_stationary_body_detects_wall_behind_it() {
    // Wall face sits inside the ray skin on the left.
    let world = flat_ground().with_box(
        Vec2::new(-1.05, 5.0),
        Vec2::new(1.0, 10.0),
        GameLayer::Platform,
    );
    let mut body = body();

    let position = body.step(Vec2::new(0.0, 1.0), DT, &world);

    assert!(body.state().colliding_left);
    assert!(!body.state().colliding_right);
    assert!((position.x - 0.05).abs() < 1.0e-4);
}

fn ramp(angle_degrees: f32) -> StaticWorld {
    let start = Vec2::new(0.6, 0.0);
    let direction = Vec2::from_angle(angle_degrees.to_radians());
    flat_ground().with_edge(start, start + direction * 5.0, GameLayer::Platform)
}

#[test]
fn test_walkable_slope_does_not_clamp() {
    let world = ramp(30.0);
    let mut body = body();
    let position = run(&mut body, Vec2::new(0.0, 1.0), &world, 2);

    body.set_horizontal_force(6.0);
    let after = body.step(position, DT, &world);

    assert!(!body.state().colliding_right);
    assert!(body.state().slope_angle_ok);
    assert!((after.x - position.x - 0.1).abs() < 1.0e-4);
}

#[test]
fn test_steep_slope_acts_as_wall() {
    let world = ramp(60.0);
    let mut body = body();
    let position = run(&mut body, Vec2::new(0.0, 1.0), &world, 2);

    body.set_horizontal_force(6.0);
    let after = body.step(position, DT, &world);

    assert!(body.state().colliding_right);
    assert!(!body.state().slope_angle_ok);
    assert!(after.x - position.x < 0.05);
}

#[test]
fn test_walks_up_gentle_slope() {
    let world = ramp(20.0);
    let mut body = body();
    let mut position = Vec2::new(0.0, 1.0);

    for _ in 0..90 {
        body.set_horizontal_force(3.0);
        position = body.step(position, DT, &world);
    }

    assert!(position.x > 2.0);
    assert!(position.y > 1.5);
}

// -----------------------------------------------------------------------------
// Ceilings and one-way platforms
// -----------------------------------------------------------------------------

#[test]
fn test_ceiling_stops_ascent_and_horizontal_motion() {
    let world = flat_ground().with_box(
        Vec2::new(0.0, 3.5),
        Vec2::new(40.0, 1.0),
        GameLayer::Platform,
    );
    let mut body = body();
    let mut position = run(&mut body, Vec2::new(0.0, 1.0), &world, 2);
    body.set_force(Vec2::new(5.0, 10.0));

    let mut bumped = false;
    for _ in 0..30 {
        position = body.step(position, DT, &world);
        // Top of the collider stays under the ceiling.
        assert!(position.y + 1.0 <= 3.0 + 1.0e-4);
        if body.state().colliding_above && !body.state().was_touching_ceiling_last_frame {
            bumped = true;
            assert_eq!(body.velocity().x, 0.0);
        }
    }

    assert!(bumped);
}

#[test]
fn test_jumps_up_through_one_way_platform_and_lands_on_it() {
    let world = flat_ground().with_edge(
        Vec2::new(-5.0, 3.0),
        Vec2::new(5.0, 3.0),
        GameLayer::OneWayPlatform,
    );
    let mut body = body();
    let position = run(&mut body, Vec2::new(0.0, 1.0), &world, 2);

    body.set_vertical_force(10.0);
    let position = run(&mut body, position, &world, 180);

    assert!(body.state().is_grounded());
    assert!((position.y - 4.0).abs() < 1.0e-3);
    assert_eq!(
        body.standing_on().map(|surface| surface.layer),
        Some(GameLayer::OneWayPlatform)
    );
}

#[test]
fn test_collision_window_drops_body_then_restores() {
    let world = flat_ground().with_edge(
        Vec2::new(-5.0, 6.0),
        Vec2::new(5.0, 6.0),
        GameLayer::OneWayPlatform,
    );
    let mut body = body();
    let mut position = run(&mut body, Vec2::new(0.0, 7.0), &world, 5);
    assert!(body.state().is_grounded());

    body.disable_collisions_for(0.3);
    assert!(!body.collisions_enabled());

    let mut elapsed = 0.0;
    let mut landed_at = None;
    for _ in 0..240 {
        position = body.step(position, DT, &world);
        elapsed += DT;
        if body.state().just_got_grounded && landed_at.is_none() {
            landed_at = Some(elapsed);
        }
    }

    let landed_at = landed_at.expect("body lands on the floor");
    assert!(landed_at >= 0.3 - 1.0e-4);
    assert!(body.collisions_enabled());
    assert!((position.y - 1.0).abs() < 1.0e-3);
}

#[test]
fn test_collisions_on_cancels_pending_window() {
    let mut body = body();
    body.disable_collisions_for(1.0);
    body.collisions_on();

    assert!(body.collisions_enabled());
    assert_eq!(body.collision_suppression_remaining(), 0.0);
}

// -----------------------------------------------------------------------------
// Moving platforms and collider changes
// -----------------------------------------------------------------------------

#[test]
fn test_moving_platform_carries_rider() {
    let mut world = StaticWorld::new();
    let platform = world.add_box(
        Vec2::new(0.0, -0.5),
        Vec2::new(40.0, 1.0),
        GameLayer::MovingPlatform,
    );
    world.set_velocity(platform, Vec2::new(3.0, 0.0));
    let mut body = body();

    let position = run(&mut body, Vec2::new(0.0, 1.0), &world, 60);

    assert!(body.state().on_moving_platform);
    assert!((position.x - 3.0).abs() < 1.0e-3);
    assert!(body.velocity().x.abs() < 1.0e-4);
}

#[test]
fn test_resize_collider_keeps_bottom_edge() {
    let mut body = body();
    let before = body.ray_bounds(Vec2::new(0.0, 1.0));

    body.resize_collider(Vec2::new(1.0, 1.0)).unwrap();
    let after = body.ray_bounds(Vec2::new(0.0, 1.0));

    assert!((before.min.y - after.min.y).abs() < 1.0e-6);
    assert!((after.size().y - 1.0).abs() < 1.0e-6);
    assert!(body.resize_collider(Vec2::new(1.0, -1.0)).is_err());
}

// -----------------------------------------------------------------------------
// Collision state
// -----------------------------------------------------------------------------

#[test]
fn test_begin_tick_snapshots_then_resets() {
    let mut state = CollisionState {
        colliding_below: true,
        colliding_above: true,
        colliding_left: true,
        just_got_grounded: true,
        ..Default::default()
    };

    state.begin_tick();

    assert!(state.was_grounded_last_frame);
    assert!(state.was_touching_ceiling_last_frame);
    assert!(!state.is_grounded());
    assert!(!state.colliding_above && !state.colliding_left);
    assert!(!state.just_got_grounded);
    assert!(state.is_falling);
}
