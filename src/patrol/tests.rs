//! Tests for path following and steerable platforms.

use bevy::prelude::*;

use super::*;
use crate::collision::StaticWorld;
use crate::movement::basic::{
    BasicMovementController, BasicMovementParameters, ColliderBox, RaySettings,
};
use crate::movement::{Controlled, MovementInput};

const DT: f32 = 1.0 / 60.0;

fn platform_body() -> BasicMovementController {
    BasicMovementController::new(
        BasicMovementParameters::default(),
        ColliderBox::new(Vec2::new(3.0, 0.5)),
        RaySettings::default(),
    )
    .unwrap()
}

// ----------------------------------------------------------------------------
// PathFollow
// ----------------------------------------------------------------------------

#[test]
fn test_move_towards_reaches_waypoint_then_turns_back() {
    let path = Path::new([Vec2::ZERO, Vec2::X]);
    let mut follow = PathFollow::new(&path, FollowType::MoveTowards, 1.0);
    assert_eq!(follow.start_position(), Some(Vec2::ZERO));

    // Already on the first waypoint: the first advance only retargets.
    let mut position = follow.advance(Vec2::ZERO, 0.1);
    assert_eq!(position, Vec2::ZERO);
    assert_eq!(follow.target(), Some(Vec2::X));

    let mut ticks = 0;
    while follow.target() == Some(Vec2::X) {
        position = follow.advance(position, 0.1);
        ticks += 1;
        assert!(ticks <= 12, "never arrived, at {position:?}");
    }
    assert!(position.x > 0.85);
    assert_eq!(follow.target(), Some(Vec2::ZERO));
}

#[test]
fn test_move_towards_reports_current_speed() {
    let path = Path::new([Vec2::ZERO, Vec2::new(10.0, 0.0)]);
    let mut follow = PathFollow::new(&path, FollowType::MoveTowards, 2.0);
    let position = follow.advance(Vec2::ZERO, 0.1);
    let position = follow.advance(position, 0.1);

    assert!((position.x - 0.2).abs() < 1e-5);
    assert!((follow.current_speed - Vec2::new(2.0, 0.0)).length() < 1e-4);
}

#[test]
fn test_lerp_halves_the_gap() {
    let goal = Vec2::new(10.0, 0.0);
    let path = Path::new([Vec2::ZERO, goal]);
    let mut follow = PathFollow::new(&path, FollowType::Lerp, 5.0);
    let mut position = follow.advance(Vec2::ZERO, 0.1);

    position = follow.advance(position, 0.1);
    assert!((position.x - 5.0).abs() < 1e-4);

    let mut ticks = 1;
    while follow.target() == Some(goal) {
        position = follow.advance(position, 0.1);
        ticks += 1;
        assert!(ticks <= 10);
    }
    assert!(position.distance(goal) < 0.1);
}

#[test]
fn test_empty_path_stays_put() {
    let mut follow = PathFollow::new(&Path::default(), FollowType::MoveTowards, 1.0);
    assert_eq!(follow.start_position(), None);
    assert_eq!(follow.advance(Vec2::splat(2.0), DT), Vec2::splat(2.0));
    assert_eq!(follow.current_speed, Vec2::ZERO);
}

#[test]
fn test_move_towards_never_overshoots() {
    assert_eq!(move_towards(Vec2::ZERO, Vec2::X, 5.0), Vec2::X);
    assert_eq!(move_towards(Vec2::X, Vec2::X, 1.0), Vec2::X);
    assert!((move_towards(Vec2::ZERO, Vec2::new(0.0, 4.0), 1.0) - Vec2::Y).length() < 1e-6);
}

// ----------------------------------------------------------------------------
// PlatformController
// ----------------------------------------------------------------------------

#[test]
fn test_platform_hovers_without_input() {
    let world = StaticWorld::new();
    let mut body = platform_body();
    let mut controller = PlatformController::default();
    controller.attach(&mut body);

    let mut position = Vec2::new(0.0, 5.0);
    for _ in 0..60 {
        controller.update(&mut body, position, DT);
        position = body.step(position, DT, &world);
    }
    assert_eq!(position, Vec2::new(0.0, 5.0));
}

#[test]
fn test_platform_move_applies_deadzone() {
    let mut controller = PlatformController::default();
    controller.move_axes(1.0, 0.05);
    assert_eq!(controller.speed(), Vec2::new(4.0, 0.0));

    controller.move_axes(-0.5, -1.0);
    assert_eq!(controller.speed(), Vec2::new(-2.0, -4.0));
}

#[test]
fn test_platform_stops_when_control_moves_away() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(MovementInput::with_axis(1.0, 1.0));
    app.add_systems(Update, drive_platforms);

    let mut body = platform_body();
    let controller = PlatformController::default();
    controller.attach(&mut body);
    let platform = app
        .world_mut()
        .spawn((Controlled, Transform::default(), body, controller))
        .id();

    app.update();
    let body = app.world().get::<BasicMovementController>(platform).unwrap();
    assert_eq!(body.velocity(), Vec2::new(4.0, 4.0));

    // Keys still held, but they now steer someone else.
    app.world_mut().entity_mut(platform).remove::<Controlled>();
    app.update();

    let controller = app.world().get::<PlatformController>(platform).unwrap();
    assert_eq!(controller.speed(), Vec2::ZERO);
    let body = app.world().get::<BasicMovementController>(platform).unwrap();
    assert_eq!(body.velocity(), Vec2::ZERO);
}

#[test]
fn test_platform_jump_rises_then_returns_to_origin() {
    let world = StaticWorld::new();
    let mut body = platform_body();
    let mut controller = PlatformController::default();
    controller.attach(&mut body);

    let origin = Vec2::ZERO;
    controller.jump(&mut body, origin, true, false);
    assert!(controller.is_jumping());
    assert!(!body.collisions_enabled());

    // A second press mid-jump is ignored.
    controller.jump(&mut body, origin, true, false);
    assert_eq!(controller.jump_phase(), PlatformJump::Rising { origin });

    let mut position = origin;
    let mut apex: f32 = 0.0;
    let mut returned_at = None;
    for tick in 0..240 {
        controller.update(&mut body, position, DT);
        position = body.step(position, DT, &world);
        apex = apex.max(position.y);
        if returned_at.is_none() && !controller.is_jumping() {
            returned_at = Some(tick);
        }
    }

    assert!((apex - 2.0).abs() < 0.15, "apex {apex}");
    assert!(returned_at.is_some());
    assert!(position.y.abs() < 1e-4);
    assert!(body.collisions_enabled());
    assert!(!body.gravity_active());
}

// ----------------------------------------------------------------------------
// Path
// ----------------------------------------------------------------------------

#[test]
fn test_ping_pong_order() {
    let path = Path::new([Vec2::ZERO, Vec2::X, Vec2::Y]);
    let visited: Vec<Vec2> = path.iter().take(7).collect();
    assert_eq!(
        visited,
        vec![Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::X, Vec2::ZERO, Vec2::X, Vec2::Y]
    );
}

#[test]
fn test_empty_path_yields_nothing() {
    assert_eq!(Path::default().iter().next(), None);
}

#[test]
fn test_single_point_repeats() {
    let path = Path::new([Vec2::splat(3.0)]);
    assert!(path.iter().take(5).all(|p| p == Vec2::splat(3.0)));
}

#[test]
fn test_restart_begins_at_first_point() {
    let path = Path::new([Vec2::ZERO, Vec2::X]);
    let mut cursor = path.iter();
    cursor.next();
    cursor.next();
    assert_eq!(path.iter().next(), Some(Vec2::ZERO));
}
