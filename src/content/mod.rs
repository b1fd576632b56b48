//! Content domain: data-driven movement configuration.
//!
//! The character config is read once at startup from assets/data and
//! validated before any controller is built from it.

mod data;
mod loader;
mod validation;


pub use data::CharacterConfig;
pub use loader::{
    ContentLoadError, load_character_config, load_single_file, parse_json, parse_ron,
};
pub use validation::validate_character_config;

use bevy::prelude::*;
use std::path::PathBuf;

/// Where the character config lives. `.ron` or `.json`.
#[derive(Resource, Debug, Clone)]
pub struct ContentPath(pub PathBuf);

impl Default for ContentPath {
    fn default() -> Self {
        Self(PathBuf::from("assets/data/character.ron"))
    }
}

/// Ordering anchor for systems that need `CharacterConfig`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentLoaded;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentPath>()
            .add_systems(Startup, load_content.in_set(ContentLoaded));
    }
}

/// Inserts `CharacterConfig` only when it loaded and validated. A missing
/// file falls back to defaults; a broken one leaves the resource absent so
/// nothing is spawned from it.
fn load_content(mut commands: Commands, path: Res<ContentPath>) {
    let config = if path.0.exists() {
        match load_character_config(&path.0) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return;
            }
        }
    } else {
        warn!(
            "Character config {} not found, using defaults",
            path.0.display()
        );
        CharacterConfig::default()
    };

    let errors = validate_character_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            error!("Invalid character config {}: {}", path.0.display(), e);
        }
        return;
    }

    info!(
        "Loaded character config: {} jumps, walk {}, run {}",
        config.advanced.number_of_jumps, config.advanced.walk_speed, config.advanced.run_speed
    );
    commands.insert_resource(config);
}
