//! Movement domain: player bootstrap from the loaded character config.

use bevy::prelude::*;

use crate::content::CharacterConfig;
use crate::core::ConfigError;
use crate::movement::advanced::{AdvancedMovementController, AnimatorParameters};
use crate::movement::basic::BasicMovementController;
use crate::movement::{Controlled, Player};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 2.0);

/// Builds both controllers from a config, failing on the first fault.
pub fn build_controllers(
    config: &CharacterConfig,
) -> Result<(BasicMovementController, AdvancedMovementController), ConfigError> {
    let body = BasicMovementController::new(config.basic.clone(), config.collider, config.rays)?;
    let abilities = AdvancedMovementController::new(config.advanced.clone(), config.permissions)?;
    Ok((body, abilities))
}

/// Spawns the player once the config is available. A missing config means
/// loading failed and was already reported.
pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Option<Res<CharacterConfig>>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let Some(config) = config else {
        error!("No valid character config, player not spawned");
        return;
    };

    let (body, abilities) = match build_controllers(&config) {
        Ok(controllers) => controllers,
        Err(e) => {
            error!("Cannot build player controllers: {}", e);
            return;
        }
    };

    info!(
        "Spawning player: collider={}x{}, jumps={}, gravity={}",
        config.collider.width,
        config.collider.height,
        config.advanced.number_of_jumps,
        config.basic.gravity
    );

    commands.spawn((
        Player,
        Controlled,
        body,
        abilities,
        AnimatorParameters::default(),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(config.collider.size()),
            ..default()
        },
        Transform::from_translation(PLAYER_SPAWN.extend(1.0)),
    ));
}
