//! Dev domain: the sandbox level used to try the controllers by hand.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::collision::{GameLayer, Ladder, Platform};
use crate::content::CharacterConfig;
use crate::movement::basic::{BasicMovementController, ColliderBox};
use crate::patrol::{FollowType, Path, PathFollow, PlatformController, PlatformSettings};

/// Seed for the scattered ledges. Same seed, same level.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SandboxSeed(pub u64);

impl Default for SandboxSeed {
    fn default() -> Self {
        Self(7)
    }
}

/// Path drawn by the gizmo pass for each patrolling platform.
#[derive(Component, Debug, Clone)]
pub struct PatrolRoute(pub Path);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ledge {
    pub center: Vec2,
    pub size: Vec2,
    pub layer: GameLayer,
}

/// Places `count` ledges above the floor. Roughly a third are one-way.
pub fn scatter_ledges(seed: u64, count: usize) -> Vec<Ledge> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let layer = if rng.random_bool(0.35) {
                GameLayer::OneWayPlatform
            } else {
                GameLayer::Platform
            };
            let height = if layer == GameLayer::OneWayPlatform { 0.2 } else { 0.6 };
            Ledge {
                center: Vec2::new(rng.random_range(-16.0..16.0), rng.random_range(3.0..12.0)),
                size: Vec2::new(rng.random_range(2.0..5.0), height),
                layer,
            }
        })
        .collect()
}

fn solid(
    commands: &mut Commands,
    center: Vec2,
    size: Vec2,
    layer: GameLayer,
    color: Color,
) {
    commands.spawn((
        Platform::new(layer),
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, [GameLayer::Character]),
    ));
}

pub(crate) fn spawn_sandbox(
    mut commands: Commands,
    seed: Res<SandboxSeed>,
    config: Option<Res<CharacterConfig>>,
) {
    let ground_color = Color::srgb(0.35, 0.4, 0.35);
    let wall_color = Color::srgb(0.25, 0.25, 0.35);
    let one_way_color = Color::srgb(0.55, 0.5, 0.35);

    // Floor, walls for clinging, and a ramp under the walkable limit.
    let floor = GameLayer::Platform;
    solid(&mut commands, Vec2::new(0.0, -0.5), Vec2::new(44.0, 1.0), floor, ground_color);
    solid(&mut commands, Vec2::new(-21.5, 10.0), Vec2::new(1.0, 20.0), floor, wall_color);
    solid(&mut commands, Vec2::new(21.5, 10.0), Vec2::new(1.0, 20.0), floor, wall_color);
    commands.spawn((
        Platform::new(GameLayer::Platform),
        Transform::default(),
        RigidBody::Static,
        Collider::segment(Vec2::new(8.0, 0.0), Vec2::new(14.0, 2.5)),
        CollisionLayers::new(GameLayer::Platform, [GameLayer::Character]),
    ));

    let ledges = scatter_ledges(seed.0, 8);
    for ledge in &ledges {
        let color = if ledge.layer == GameLayer::OneWayPlatform {
            one_way_color
        } else {
            ground_color
        };
        solid(&mut commands, ledge.center, ledge.size, ledge.layer, color);
    }
    info!("Sandbox seed {}: {} ledges", seed.0, ledges.len());

    // Ladder from the floor up to a ledge.
    solid(&mut commands, Vec2::new(-12.0, 8.3), Vec2::new(4.0, 0.6), floor, ground_color);
    commands.spawn((
        Ladder {
            size: Vec2::new(1.0, 8.0),
            top_height: 0.5,
        },
        Sprite {
            color: Color::srgba(0.6, 0.45, 0.25, 0.6),
            custom_size: Some(Vec2::new(1.0, 8.0)),
            ..default()
        },
        Transform::from_xyz(-12.0, 4.0, -0.5),
    ));

    // Patrolling moving platform.
    let route = Path::new([Vec2::new(-6.0, 4.0), Vec2::new(4.0, 4.0), Vec2::new(4.0, 9.0)]);
    commands.spawn((
        Platform::new(GameLayer::MovingPlatform),
        PathFollow::new(&route, FollowType::MoveTowards, 2.0),
        PatrolRoute(route),
        Sprite {
            color: Color::srgb(0.4, 0.6, 0.9),
            custom_size: Some(Vec2::new(3.0, 0.5)),
            ..default()
        },
        Transform::from_xyz(-6.0, 4.0, 0.0),
        RigidBody::Kinematic,
        Collider::rectangle(3.0, 0.5),
        CollisionLayers::new(GameLayer::MovingPlatform, [GameLayer::Character]),
    ));

    // Steerable platform; Tab hands it the controls.
    let settings = config
        .map(|config| config.platform)
        .unwrap_or_else(PlatformSettings::default);
    let collider = ColliderBox::new(Vec2::new(3.0, 0.5));
    match BasicMovementController::new(Default::default(), collider, Default::default()) {
        Ok(body) => {
            commands.spawn((
                SteerablePlatform,
                Platform::new(GameLayer::MovingPlatform),
                PlatformController::new(settings),
                body,
                Sprite {
                    color: Color::srgb(0.8, 0.45, 0.6),
                    custom_size: Some(collider.size()),
                    ..default()
                },
                Transform::from_xyz(12.0, 6.0, 0.0),
                RigidBody::Kinematic,
                Collider::rectangle(collider.width, collider.height),
                CollisionLayers::new(GameLayer::MovingPlatform, [GameLayer::Character]),
            ));
        }
        Err(e) => error!("Cannot build steerable platform: {}", e),
    }
}

#[derive(Component, Debug)]
pub struct SteerablePlatform;
