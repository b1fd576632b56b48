//! Movement domain: the raycast body, the ability layer above it, and the
//! systems that run them once per frame.

pub mod advanced;
pub mod basic;
mod bootstrap;
pub mod control;
mod input;
mod systems;

#[cfg(test)]
mod tests;

pub use advanced::{
    AdvancedMovementController, AnimationFrame, AnimatorParameters, Facing, MovementPhase,
};
pub use basic::{BasicMovementController, CollisionState};
pub use bootstrap::{PLAYER_SPAWN, build_controllers};
pub use control::{AXIS_DEADZONE, Controllable, Controlled, deadzone};
pub use input::MovementInput;

use bevy::prelude::*;

use crate::content::ContentLoaded;
use crate::core::MovementSet;

#[derive(Component, Debug)]
pub struct Player;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_systems(Startup, bootstrap::spawn_player.after(ContentLoaded))
            .add_systems(Update, input::read_input.in_set(MovementSet::Input))
            .add_systems(
                Update,
                (
                    systems::detect_ladders,
                    systems::apply_player_input,
                    systems::update_abilities,
                )
                    .chain()
                    .in_set(MovementSet::Intent),
            )
            .add_systems(Update, systems::step_bodies.in_set(MovementSet::Physics))
            .add_systems(
                Update,
                (systems::finish_abilities, systems::update_sprites)
                    .chain()
                    .in_set(MovementSet::Presentation),
            );
    }
}
