//! Basic movement: per-tick collision flags.

/// Collision snapshot of the current tick. The `was_*` fields carry the
/// previous tick's terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionState {
    pub colliding_right: bool,
    pub colliding_left: bool,
    pub colliding_above: bool,
    pub colliding_below: bool,
    /// Angle in degrees of the last side surface probed this tick
    pub slope_angle: f32,
    pub slope_angle_ok: bool,
    pub on_moving_platform: bool,
    pub is_falling: bool,
    pub was_grounded_last_frame: bool,
    pub was_touching_ceiling_last_frame: bool,
    pub just_got_grounded: bool,
}

impl CollisionState {
    pub fn is_grounded(&self) -> bool {
        self.colliding_below
    }

    /// Snapshots grounded/ceiling contact, then clears every per-tick flag.
    pub fn begin_tick(&mut self) {
        self.was_grounded_last_frame = self.colliding_below;
        self.was_touching_ceiling_last_frame = self.colliding_above;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.colliding_left = false;
        self.colliding_right = false;
        self.colliding_above = false;
        self.colliding_below = false;
        self.slope_angle = 0.0;
        self.slope_angle_ok = false;
        self.on_moving_platform = false;
        self.just_got_grounded = false;
        self.is_falling = true;
    }
}

impl std::fmt::Display for CollisionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(controller: r:{} l:{} a:{} b:{} angle: {:.1})",
            self.colliding_right,
            self.colliding_left,
            self.colliding_above,
            self.colliding_below,
            self.slope_angle
        )
    }
}
