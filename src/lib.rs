//! Kinematic character controller for 2D platformers: a raycast body,
//! an ability state machine on top of it, and the patrol collaborators
//! that move platforms around.

pub mod collision;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod dev;
pub mod movement;
pub mod patrol;
