//! Patrol domain: path following and steerable platforms.

mod follow;
mod path;
mod platform;

#[cfg(test)]
mod tests;

pub use follow::{FollowType, PathFollow, move_towards};
pub use path::{Path, PingPong};
pub use platform::{PlatformController, PlatformJump, PlatformSettings};

use bevy::prelude::*;

use crate::collision::Platform;
use crate::core::MovementSet;
use crate::movement::basic::BasicMovementController;
use crate::movement::{Controllable, Controlled, MovementInput};

pub struct PatrolPlugin;

impl Plugin for PatrolPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (place_followers, attach_platforms).before(MovementSet::Intent),
        )
        .add_systems(
            Update,
            (follow_paths, drive_platforms).in_set(MovementSet::Intent),
        )
        .add_systems(
            Update,
            publish_platform_velocity.in_set(MovementSet::Presentation),
        );
    }
}

/// Snaps new followers onto their first waypoint.
fn place_followers(mut followers: Query<(&mut Transform, &PathFollow), Added<PathFollow>>) {
    for (mut transform, follow) in &mut followers {
        if let Some(start) = follow.start_position() {
            transform.translation = start.extend(transform.translation.z);
        } else {
            warn!("PathFollow has an empty path, it will not move");
        }
    }
}

fn attach_platforms(
    mut platforms: Query<
        (&PlatformController, &mut BasicMovementController),
        Added<PlatformController>,
    >,
) {
    for (controller, mut body) in &mut platforms {
        controller.attach(&mut body);
    }
}

fn follow_paths(
    time: Res<Time>,
    mut followers: Query<(&mut Transform, &mut PathFollow, Option<&mut Platform>)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut follow, platform) in &mut followers {
        let position = transform.translation.truncate();
        let next = follow.advance(position, dt);
        transform.translation = next.extend(transform.translation.z);

        // Riders read the platform velocity to be carried along.
        if let Some(mut platform) = platform {
            platform.velocity = follow.current_speed;
        }
    }
}

fn drive_platforms(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut platforms: Query<(
        &Transform,
        &mut BasicMovementController,
        &mut PlatformController,
        Has<Controlled>,
    )>,
) {
    let dt = time.delta_secs();

    for (transform, mut body, mut controller, controlled) in &mut platforms {
        let position = transform.translation.truncate();
        if controlled {
            controller.move_axes(input.axis.x, input.axis.y);
            let was_jumping = controller.is_jumping();
            controller.jump(
                &mut body,
                position,
                input.jump_just_pressed,
                input.jump_just_released,
            );
            if !was_jumping && controller.is_jumping() {
                debug!("Platform jumped from {:?}", position);
            }
        } else {
            controller.move_axes(0.0, 0.0);
        }
        controller.update(&mut body, position, dt);
    }
}

/// Steered platforms carry riders with the velocity their body moved at.
fn publish_platform_velocity(
    mut platforms: Query<(&BasicMovementController, &mut Platform), With<PlatformController>>,
) {
    for (body, mut platform) in &mut platforms {
        platform.velocity = body.velocity();
    }
}
