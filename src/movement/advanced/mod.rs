//! Advanced movement: jump, dash, crouch, ladder, wall-cling and broadcast
//! abilities layered over the basic controller.

mod animation;
mod controller;
mod parameters;
mod state;


pub use animation::{AnimationFrame, AnimationSink, AnimatorParameters};
pub use controller::{
    AbilityEvent, AdvancedMovementController, DIVE_THRESHOLD, DROP_THROUGH_NUDGE,
    PLATFORM_RELEASE_TIME,
};
pub use parameters::{AdvancedMovementParameters, AdvancedMovementPermissions, JumpBehavior};
pub use state::{AdvancedMovementState, Facing, MovementPhase};
