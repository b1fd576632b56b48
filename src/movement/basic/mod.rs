//! Basic movement: velocity ownership and the raycast physics step.

mod controller;
mod parameters;
mod state;

#[cfg(test)]
mod tests;

pub use controller::{
    BasicMovementController, LARGE_VALUE, MOVING_PLATFORM_GRAVITY, OBSTACLE_HEIGHT_TOLERANCE,
    SMALL_VALUE,
};
pub use parameters::{BasicMovementParameters, ColliderBox, RaySettings};
pub use state::CollisionState;
