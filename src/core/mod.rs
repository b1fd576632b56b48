//! Core domain: tick phases, timed effects, and shared error types.

mod error;
mod events;
mod resources;
pub mod timers;


pub use error::ConfigError;
pub use events::{DashStartedEvent, JumpKind, JumpedEvent, LandedEvent};
pub use resources::{SimulationPaused, simulation_active};
pub use timers::Countdown;

use bevy::prelude::*;

/// Ordering of one movement tick. Force commands issued in `Intent` are
/// always observed by `Physics` in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementSet {
    /// Sample devices into `MovementInput`.
    Input,
    /// Patrol paths and ability logic issue force commands.
    Intent,
    /// Gravity integration, ray sweeps, position commit.
    Physics,
    /// Post-physics bookkeeping: jump refill, animation, facing.
    Presentation,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationPaused>()
            .add_message::<LandedEvent>()
            .add_message::<JumpedEvent>()
            .add_message::<DashStartedEvent>()
            .configure_sets(
                Update,
                (
                    MovementSet::Input,
                    MovementSet::Intent,
                    MovementSet::Physics,
                    MovementSet::Presentation,
                )
                    .chain(),
            )
            .configure_sets(Update, MovementSet::Intent.run_if(simulation_active))
            .configure_sets(Update, MovementSet::Physics.run_if(simulation_active))
            .configure_sets(
                Update,
                MovementSet::Presentation.run_if(simulation_active),
            );
    }
}
