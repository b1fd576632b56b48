//! Core domain: shared resources for driving the simulation.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource tracking if the movement simulation should be paused.
/// The simulation is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct SimulationPaused {
    pub sources: HashSet<String>,
}

impl SimulationPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    /// Flips a single source on or off.
    pub fn toggle(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }
}

/// Run condition: returns true only when the simulation is not paused.
/// Both movement phases share this condition so a paused frame skips the
/// whole tick rather than half of it.
pub fn simulation_active(paused: Res<SimulationPaused>) -> bool {
    !paused.is_paused()
}
