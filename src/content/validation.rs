//! Validation of loaded movement configs before anything is spawned.

use super::data::CharacterConfig;
use crate::core::ConfigError;

/// Validate every section of a character config.
/// Returns a list of errors, empty if the config is usable.
pub fn validate_character_config(config: &CharacterConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    config.basic.validate(&mut errors);
    config.collider.validate(&mut errors);
    config.rays.validate(&mut errors);
    config.advanced.validate(&mut errors);

    let platform = &config.platform;
    for (field, value) in [
        ("platform.h_movement_speed", platform.h_movement_speed),
        ("platform.v_movement_speed", platform.v_movement_speed),
        ("platform.jump_height", platform.jump_height),
    ] {
        if value < 0.0 {
            errors.push(ConfigError::Negative { field, value });
        }
    }
    // A platform that cannot move back never finishes its jump.
    if platform.return_speed <= 0.0 {
        errors.push(ConfigError::NonPositiveDuration {
            field: "platform.return_speed",
            value: platform.return_speed,
        });
    }

    errors
}
