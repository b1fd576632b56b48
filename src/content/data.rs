//! Data definitions for the movement config files.
//!
//! These structs mirror assets/data/character.ron. Every field has a
//! default, so a file only lists what it changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::advanced::{AdvancedMovementParameters, AdvancedMovementPermissions};
use crate::movement::basic::{BasicMovementParameters, ColliderBox, RaySettings};
use crate::patrol::PlatformSettings;

// ============================================================================
// Character (character.ron)
// ============================================================================

/// Everything needed to build the player's two controllers.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub basic: BasicMovementParameters,
    pub collider: ColliderBox,
    pub rays: RaySettings,
    pub advanced: AdvancedMovementParameters,
    pub permissions: AdvancedMovementPermissions,
    /// Steerable platforms spawned next to the character
    pub platform: PlatformSettings,
}
