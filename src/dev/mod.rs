//! Dev tools for trying the controllers by hand.
//!
//! Features:
//! - Seeded sandbox level with ledges, a ladder, and two kinds of platforms
//! - Ray fan overlay (G)
//! - Pause the movement simulation (P)
//! - Hand the controls to the steerable platform and back (Tab)
//! - Respawn the player (R, or automatically after falling out)

mod gizmos;
mod sandbox;

#[cfg(test)]
mod tests;

pub use sandbox::{Ledge, PatrolRoute, SandboxSeed, SteerablePlatform, scatter_ledges};

use bevy::prelude::*;

use crate::content::ContentLoaded;
use crate::core::{MovementSet, SimulationPaused};
use crate::movement::basic::BasicMovementController;
use crate::movement::{Controlled, PLAYER_SPAWN, Player};

const CAMERA_SCALE: f32 = 1.0 / 32.0;
const KILL_HEIGHT: f32 = -30.0;

#[derive(Resource, Debug)]
pub struct DevSettings {
    pub show_rays: bool,
}

impl Default for DevSettings {
    fn default() -> Self {
        Self { show_rays: true }
    }
}

pub struct DevPlugin;

impl Plugin for DevPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DevSettings>()
            .init_resource::<SandboxSeed>()
            .add_systems(
                Startup,
                (spawn_camera, sandbox::spawn_sandbox.after(ContentLoaded)),
            )
            .add_systems(Update, handle_dev_hotkeys.before(MovementSet::Input))
            .add_systems(
                Update,
                (gizmos::draw_ray_fans, gizmos::draw_patrol_routes, follow_player)
                    .after(MovementSet::Presentation),
            );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_translation(PLAYER_SPAWN.extend(0.0))
            .with_scale(Vec3::splat(CAMERA_SCALE)),
    ));
}

fn handle_dev_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<DevSettings>,
    mut paused: ResMut<SimulationPaused>,
    mut players: Query<(Entity, &mut Transform, &mut BasicMovementController), With<Player>>,
    platforms: Query<(Entity, Has<Controlled>), With<SteerablePlatform>>,
) {
    if keyboard.just_pressed(KeyCode::KeyG) {
        settings.show_rays = !settings.show_rays;
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        paused.toggle("dev");
        info!("Simulation paused: {}", paused.is_paused());
    }

    for (entity, mut transform, mut body) in &mut players {
        if keyboard.just_pressed(KeyCode::KeyR) || transform.translation.y < KILL_HEIGHT {
            transform.translation = PLAYER_SPAWN.extend(transform.translation.z);
            body.set_force(Vec2::ZERO);
            info!("Respawned player {:?}", entity);
        }
    }

    if keyboard.just_pressed(KeyCode::Tab) {
        for (platform, platform_controlled) in &platforms {
            for (player, _, _) in &players {
                if platform_controlled {
                    commands.entity(platform).remove::<Controlled>();
                    commands.entity(player).insert(Controlled);
                } else {
                    commands.entity(player).remove::<Controlled>();
                    commands.entity(platform).insert(Controlled);
                }
            }
            let receiver = if platform_controlled { "player" } else { "platform" };
            info!("Controls handed to the {}", receiver);
        }
    }
}

fn follow_player(
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    for mut camera in &mut cameras {
        let target = player.translation.truncate();
        let current = camera.translation.truncate();
        camera.translation = current.lerp(target, 0.1).extend(camera.translation.z);
    }
}
