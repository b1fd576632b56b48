//! Advanced movement: the ability state machine driving a basic controller.
//!
//! Each tick runs in two halves around the physics step. `handle_input` and
//! `early_update` translate intent into force commands on the body;
//! `late_update` reads the step's collision result back (jump refill, dive
//! end) and produces the animation frame.

use bevy::prelude::*;

use crate::collision::GameLayer;
use crate::core::{ConfigError, Countdown, JumpKind};
use crate::movement::advanced::{
    AdvancedMovementParameters, AdvancedMovementPermissions, AdvancedMovementState,
    AnimationFrame, Facing, JumpBehavior, MovementPhase,
};
use crate::movement::basic::{BasicMovementController, ColliderBox};
use crate::movement::control::{AXIS_DEADZONE, Controllable, deadzone};
use crate::movement::input::MovementInput;

/// Vertical axis below which the dash action turns into a dive.
pub const DIVE_THRESHOLD: f32 = -0.8;
/// Downward nudge that puts the character under a one-way platform.
pub const DROP_THROUGH_NUDGE: f32 = 0.1;
/// Collision window when leaving a one-way or moving platform.
pub const PLATFORM_RELEASE_TIME: f32 = 0.3;
const PRESSURE_JUMP_FACTOR: f32 = 12.0;
/// Horizontal input is ignored this long after a wall jump, so holding
/// toward the wall does not cancel the kick.
pub const WALL_JUMP_LOCK_TIME: f32 = 0.2;

/// Things the host may want to react to (sound, camera shake, messages).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEvent {
    Jumped { kind: JumpKind, jumps_left: i32 },
    DashStarted { dive: bool },
}

#[derive(Component, Debug, Clone)]
pub struct AdvancedMovementController {
    pub default_parameters: AdvancedMovementParameters,
    override_parameters: Option<AdvancedMovementParameters>,
    pub permissions: AdvancedMovementPermissions,
    state: AdvancedMovementState,

    horizontal_move: f32,
    vertical_move: f32,
    is_moving: bool,

    /// Seconds of simulated time seen by this controller
    elapsed: f32,
    jump_press_time: Option<f32>,
    jump_button_pressed: bool,
    jump_button_released: bool,

    dash: Countdown,
    dash_cooldown: Countdown,
    wall_jump_lock: Countdown,
    /// Collider to restore when standing up
    standing_collider: Option<ColliderBox>,

    events: Vec<AbilityEvent>,
}

impl AdvancedMovementController {
    pub fn new(
        parameters: AdvancedMovementParameters,
        permissions: AdvancedMovementPermissions,
    ) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        parameters.validate(&mut errors);
        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }

        let mut state = AdvancedMovementState::default();
        state.initialize(parameters.number_of_jumps);

        Ok(Self {
            default_parameters: parameters,
            override_parameters: None,
            permissions,
            state,
            horizontal_move: 0.0,
            vertical_move: 0.0,
            is_moving: false,
            elapsed: 0.0,
            jump_press_time: None,
            jump_button_pressed: false,
            jump_button_released: false,
            dash: Countdown::default(),
            dash_cooldown: Countdown::default(),
            wall_jump_lock: Countdown::default(),
            standing_collider: None,
            events: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &AdvancedMovementState {
        &self.state
    }

    pub fn current_parameters(&self) -> &AdvancedMovementParameters {
        self.override_parameters
            .as_ref()
            .unwrap_or(&self.default_parameters)
    }

    pub fn set_override_parameters(&mut self, parameters: Option<AdvancedMovementParameters>) {
        self.override_parameters = parameters;
    }

    pub fn facing(&self) -> Facing {
        self.state.facing
    }

    /// Ladder overlap computed by the host from the level geometry.
    pub fn set_ladder_contact(&mut self, colliding: bool, top_colliding: bool) {
        self.state.ladder_colliding = colliding;
        self.state.ladder_top_colliding = top_colliding;
    }

    /// Events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<AbilityEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self, body: &BasicMovementController) -> MovementPhase {
        MovementPhase::resolve(&self.state, body.state(), body.velocity())
    }

    /// Horizontal speed for the current mode.
    pub fn active_speed(&self) -> f32 {
        let parameters = self.current_parameters();
        if self.state.broadcasting || self.state.recalling {
            parameters.broadcast_walk_speed
        } else if self.state.crouching {
            parameters.crouch_speed
        } else if self.state.running {
            parameters.run_speed
        } else {
            parameters.walk_speed
        }
    }

    /// Initial vertical speed that reaches `jump_height` under the body's gravity.
    pub fn launch_velocity(&self, body: &BasicMovementController) -> f32 {
        let gravity = body.current_parameters().gravity.abs();
        (2.0 * self.current_parameters().jump_height * gravity).sqrt()
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Routes one tick of player intent to the individual abilities. Modes
    /// are settled first so the actions of the same tick see them.
    pub fn handle_input(&mut self, body: &mut BasicMovementController, input: &MovementInput) {
        self.recall(body, input.recall);
        self.broadcast(body, input.broadcast);

        self.move_axes(input.axis.x, input.axis.y);
        self.jump(body, input.jump_just_pressed, input.jump_just_released);
        self.run(body, input.run_held);
        if input.dash_just_pressed {
            self.dash(body);
        }
    }

    pub fn move_axes(&mut self, horizontal: f32, vertical: f32) {
        if !self.permissions.h_move_enabled {
            return;
        }
        self.horizontal_move = horizontal;
        self.vertical_move = vertical;
    }

    // -------------------------------------------------------------------------
    // Jumping
    // -------------------------------------------------------------------------

    pub fn jump_authorized(&self, body: &BasicMovementController) -> bool {
        match self.current_parameters().jump_restrictions {
            JumpBehavior::CanJumpAnywhere | JumpBehavior::CanJumpAnywhereAnyNumberOfTimes => true,
            JumpBehavior::CanJumpOnGround => body.state().is_grounded(),
            JumpBehavior::CantJump => false,
        }
    }

    pub fn can_jump(&mut self, body: &BasicMovementController) -> bool {
        if !self.state.can_move_freely {
            return false;
        }
        if !self.permissions.jump_enabled || !self.jump_authorized(body) {
            return false;
        }

        self.state.can_jump = (body.state().is_grounded() || self.state.number_of_jumps_left > 0)
            && !self.state.broadcasting
            && !self.state.recalling;

        self.state.can_jump
            || self.current_parameters().jump_restrictions
                == JumpBehavior::CanJumpAnywhereAnyNumberOfTimes
    }

    /// Launches the character. Holding down on a one-way platform drops
    /// through it instead.
    pub fn start_jump(&mut self, body: &mut BasicMovementController) {
        if !self.state.can_move_freely {
            return;
        }

        let grounded = body.state().is_grounded();
        let standing_layer = body.standing_on().map(|surface| surface.layer);

        if self.vertical_move < 0.0 && grounded && standing_layer == Some(GameLayer::OneWayPlatform)
        {
            body.translate(Vec2::new(0.0, -DROP_THROUGH_NUDGE));
            body.disable_collisions_for(PLATFORM_RELEASE_TIME);
            body.reset_moving_platforms_gravity();
            debug!("Dropping through one-way platform");
            self.events.push(AbilityEvent::Jumped {
                kind: JumpKind::DropThrough,
                jumps_left: self.state.number_of_jumps_left,
            });
            return;
        }

        // Don't get dragged back down by the platform mid-air.
        if self.vertical_move >= 0.0 && grounded && standing_layer == Some(GameLayer::MovingPlatform)
        {
            body.disable_collisions_for(PLATFORM_RELEASE_TIME);
            body.reset_moving_platforms_gravity();
        }

        self.state.number_of_jumps_left -= 1;
        self.state.can_move_freely = true;
        body.set_gravity_active(true);

        self.jump_press_time = Some(self.elapsed);
        self.jump_button_pressed = true;
        self.jump_button_released = false;
        self.state.jumping = true;

        body.set_vertical_force(self.launch_velocity(body));

        let kind = if grounded { JumpKind::Ground } else { JumpKind::Air };
        debug!(
            "{:?} jump: jumps_left={}",
            kind, self.state.number_of_jumps_left
        );
        self.events.push(AbilityEvent::Jumped {
            kind,
            jumps_left: self.state.number_of_jumps_left,
        });
    }

    pub fn stop_jump(&mut self) {
        self.jump_button_pressed = false;
        self.jump_button_released = true;
    }

    pub fn jump(&mut self, body: &mut BasicMovementController, press: bool, release: bool) {
        if !self.permissions.jump_enabled || self.state.broadcasting || self.state.recalling {
            return;
        }

        if press {
            if self.state.ladder_climbing {
                self.leave_ladder();
            }

            if self.state.wall_clinging
                && self.permissions.wall_jump_enabled
                && !body.state().is_grounded()
            {
                self.wall_jump(body);
            } else if self.can_jump(body) {
                self.start_jump(body);
            }
        }

        if release {
            self.stop_jump();
        }
    }

    /// Kicks off a wall the character is clinging to. Does not use a jump.
    fn wall_jump(&mut self, body: &mut BasicMovementController) {
        let away = if body.state().colliding_right {
            Facing::Left
        } else {
            Facing::Right
        };

        self.state.wall_clinging = false;
        body.slow_fall(0.0);
        body.set_gravity_active(true);
        body.set_vertical_force(self.launch_velocity(body));
        body.set_horizontal_force(away.sign() * self.current_parameters().wall_jump_force);
        self.state.facing = away;
        self.wall_jump_lock.start(WALL_JUMP_LOCK_TIME);

        self.jump_press_time = Some(self.elapsed);
        self.jump_button_pressed = true;
        self.jump_button_released = false;
        self.state.jumping = true;

        debug!("Wall jump: away={:?}", away);
        self.events.push(AbilityEvent::Jumped {
            kind: JumpKind::Wall,
            jumps_left: self.state.number_of_jumps_left,
        });
    }

    /// Cuts a jump short once the button is released after the minimum airtime.
    fn pressure_jump(&mut self, body: &mut BasicMovementController, dt: f32) {
        if !self.jump_authorized(body) {
            return;
        }
        let Some(press_time) = self.jump_press_time else {
            return;
        };

        let gravity = body.current_parameters().gravity.abs();
        if self.elapsed - press_time >= self.current_parameters().jump_minimum_air_time
            && body.velocity().y > gravity.sqrt()
            && self.jump_button_released
            && !self.jump_button_pressed
        {
            self.jump_button_released = false;
            if self.current_parameters().jump_is_proportional_to_the_press_time {
                body.add_force(Vec2::new(0.0, PRESSURE_JUMP_FACTOR * -gravity * dt));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Running, dashing, diving
    // -------------------------------------------------------------------------

    pub fn run(&mut self, body: &BasicMovementController, held: bool) {
        if !held {
            self.state.running = false;
            return;
        }
        if self.permissions.run_enabled
            && self.state.can_move_freely
            && body.state().is_grounded()
            && !self.state.crouching
        {
            self.state.running = true;
        }
    }

    /// Dashes in the facing direction, or dives when aiming steeply down in
    /// the air. A dash while the charge is spent is ignored.
    pub fn dash(&mut self, body: &mut BasicMovementController) {
        if !self.permissions.dash_enabled {
            return;
        }

        if self.vertical_move > DIVE_THRESHOLD {
            if self.state.can_dash && !self.state.dashing && self.state.can_move_freely {
                self.start_dash(body);
            }
        } else if !body.state().is_grounded() && !self.state.diving {
            body.set_force(Vec2::ZERO);
            self.state.diving = true;
            debug!("Dive started");
            self.events.push(AbilityEvent::DashStarted { dive: true });
        }
    }

    fn start_dash(&mut self, body: &mut BasicMovementController) {
        self.state.can_dash = false;
        self.state.dashing = true;
        body.set_gravity_active(false);
        body.set_vertical_force(0.0);
        self.dash.start(self.current_parameters().dash_duration);

        debug!("Dash started: facing={:?}", self.state.facing);
        self.events.push(AbilityEvent::DashStarted { dive: false });
    }

    fn end_dash(&mut self, body: &mut BasicMovementController) {
        self.state.dashing = false;
        body.set_gravity_active(true);
        self.dash_cooldown.start(self.current_parameters().dash_cooldown);
    }

    // -------------------------------------------------------------------------
    // Broadcast / recall
    // -------------------------------------------------------------------------

    /// Slow walking mode with jumping disabled, only while grounded.
    pub fn broadcast(&mut self, body: &mut BasicMovementController, value: f32) {
        let active =
            value > 0.0 && body.state().is_grounded() && self.permissions.broadcast_enabled;

        self.state.broadcasting_previously = self.state.broadcasting;
        self.state.broadcasting = active;

        if active && !self.state.broadcasting_previously {
            stop_movement(body);
            info!("Broadcast started");
        }
    }

    /// Like broadcast, but the character cannot move at all until it ends.
    pub fn recall(&mut self, body: &mut BasicMovementController, value: f32) {
        let active =
            value > 0.0 && body.state().is_grounded() && self.permissions.broadcast_enabled;

        self.state.recalling_previously = self.state.recalling;
        self.state.recalling = active;

        if active {
            self.state.can_move_freely = false;
            if !self.state.recalling_previously {
                stop_movement(body);
                info!("Recall started");
            }
        } else if self.state.recalling_previously {
            self.state.can_move_freely = true;
            self.state.can_jump = true;
        }
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Applies the abilities' force commands for this tick. Runs after
    /// `handle_input` and before the body steps.
    pub fn early_update(&mut self, body: &mut BasicMovementController, dt: f32) {
        self.elapsed += dt;

        // A cooldown started by `end_dash` below is first ticked next tick.
        if self.dash_cooldown.tick(dt) {
            self.state.can_dash = true;
            debug!("Dash recharged");
        }
        if self.state.dashing {
            let force = self.state.facing.sign() * self.current_parameters().dash_force;
            body.add_horizontal_force(force);
            if self.dash.tick(dt) {
                self.end_dash(body);
            }
        }
        let wall_jump_locked = self.wall_jump_lock.is_active();
        self.wall_jump_lock.tick(dt);

        if !wall_jump_locked {
            self.horizontal_movement(body, dt);
        }
        self.vertical_movement(body);
        self.ladder(body);
        self.crouch(body);
        self.wall_clinging(body);

        if self.state.diving {
            let gravity = body.current_parameters().gravity.abs();
            body.add_vertical_force(-2.0 * gravity * dt);
        }

        self.pressure_jump(body, dt);

        body.set_gravity_active(!self.state.dashing && !self.state.ladder_climbing);
    }

    /// Reads the step's result back. Returns this tick's animation frame.
    pub fn late_update(&mut self, body: &BasicMovementController) -> AnimationFrame {
        let collisions = body.state();

        if collisions.just_got_grounded {
            self.state.number_of_jumps_left = self.current_parameters().number_of_jumps;
            self.state.jumping = false;
        }
        if collisions.is_grounded() && self.state.diving {
            self.state.diving = false;
            debug!("Dive ended");
        }
        if body.velocity().y < 0.0 && !collisions.is_grounded() {
            self.state.jumping = false;
        }

        self.animation_frame(body)
    }

    pub fn animation_frame(&self, body: &BasicMovementController) -> AnimationFrame {
        let collisions = body.state();
        let velocity = body.velocity();
        AnimationFrame {
            grounded: collisions.is_grounded(),
            speed: velocity.x.abs(),
            v_speed: velocity.y,
            running: self.state.running,
            dashing: self.state.dashing,
            crouching: self.state.crouching,
            wall_clinging: self.state.wall_clinging,
            diving: self.state.diving,
            ladder_climbing: self.state.ladder_climbing,
            ladder_climbing_speed: self.state.ladder_climbing_speed,
            is_moving: self.is_moving,
            is_jumping: self.state.jumping,
            is_falling: velocity.y < 0.0 && !collisions.is_grounded(),
            is_broadcasting: self.state.broadcasting,
        }
    }

    fn horizontal_movement(&mut self, body: &mut BasicMovementController, dt: f32) {
        if !self.state.can_move_freely || !self.permissions.h_move_enabled || self.state.dashing {
            return;
        }

        let normalized = deadzone(self.horizontal_move);
        self.is_moving = normalized != 0.0;
        if (normalized > 0.0 && self.state.facing == Facing::Left)
            || (normalized < 0.0 && self.state.facing == Facing::Right)
        {
            self.state.facing = self.state.facing.flipped();
        }

        let target = normalized * self.active_speed();
        let speed = if self.current_parameters().smooth_movement {
            let basic = body.current_parameters();
            let acceleration = if body.state().is_grounded() {
                basic.ground_acceleration
            } else {
                basic.air_acceleration
            };
            let current = body.velocity().x;
            current + (target - current) * (dt * acceleration).min(1.0)
        } else {
            target
        };
        body.set_horizontal_force(speed);
    }

    fn vertical_movement(&mut self, body: &mut BasicMovementController) {
        if !self.state.can_move_freely || !self.permissions.v_move_enabled {
            return;
        }
        let normalized = deadzone(self.vertical_move);
        body.set_vertical_force(normalized * self.current_parameters().v_movement_speed);
    }

    fn ladder(&mut self, body: &mut BasicMovementController) {
        if !self.state.ladder_colliding {
            if self.state.ladder_climbing {
                self.leave_ladder();
            }
            return;
        }

        let grounded = body.state().is_grounded();

        // Reached the floor at the bottom of the ladder.
        if self.state.ladder_climbing && grounded && !self.state.ladder_top_colliding {
            self.leave_ladder();
            return;
        }

        if !self.state.ladder_climbing {
            if self.state.ladder_top_colliding && grounded && self.vertical_move < -AXIS_DEADZONE {
                body.translate(Vec2::new(0.0, -DROP_THROUGH_NUDGE));
                body.disable_collisions_for(PLATFORM_RELEASE_TIME);
                self.start_climbing(body);
            } else if !self.state.ladder_top_colliding
                && self.vertical_move > AXIS_DEADZONE
                && self.state.can_move_freely
            {
                self.start_climbing(body);
            }
        }

        if self.state.ladder_climbing {
            let vertical = deadzone(self.vertical_move);
            body.set_horizontal_force(0.0);
            body.set_vertical_force(vertical * self.current_parameters().ladder_speed);
            self.state.ladder_climbing_speed = vertical.abs();
        }
    }

    fn start_climbing(&mut self, body: &mut BasicMovementController) {
        self.state.ladder_climbing = true;
        self.state.can_move_freely = false;
        self.state.running = false;
        body.set_force(Vec2::ZERO);
        body.set_gravity_active(false);
        debug!("Ladder climbing started");
    }

    fn leave_ladder(&mut self) {
        self.state.ladder_climbing = false;
        self.state.ladder_climbing_speed = 0.0;
        self.state.can_move_freely = true;
    }

    fn crouch(&mut self, body: &mut BasicMovementController) {
        if !self.permissions.crouch_enabled {
            return;
        }

        if self.vertical_move < -AXIS_DEADZONE
            && body.state().is_grounded()
            && !self.state.ladder_climbing
        {
            self.state.crouching = true;
            self.state.running = false;
        } else {
            self.state.crouching = false;
        }

        if self.state.crouching != self.state.crouching_previously {
            let standing = *self.standing_collider.get_or_insert(body.collider());
            let height = if self.state.crouching {
                standing.height * self.current_parameters().crouch_height_ratio
            } else {
                standing.height
            };
            if let Err(error) = body.resize_collider(Vec2::new(standing.width, height)) {
                warn!("Crouch resize rejected: {}", error);
            }
        }
        self.state.crouching_previously = self.state.crouching;
    }

    fn wall_clinging(&mut self, body: &mut BasicMovementController) {
        if !self.permissions.wall_clinging_enabled {
            return;
        }

        let collisions = body.state();
        let pressing_into_wall = (collisions.colliding_right && self.horizontal_move > AXIS_DEADZONE)
            || (collisions.colliding_left && self.horizontal_move < -AXIS_DEADZONE);
        let clinging = pressing_into_wall
            && !collisions.is_grounded()
            && body.velocity().y < 0.0
            && !self.state.dashing
            && !self.state.ladder_climbing;

        self.state.wall_clinging = clinging;
        body.slow_fall(if clinging {
            self.current_parameters().wall_clinging_slow_factor
        } else {
            0.0
        });
    }
}

fn stop_movement(body: &mut BasicMovementController) {
    body.set_horizontal_force(0.0);
    body.set_vertical_force(0.0);
}

impl Controllable for AdvancedMovementController {
    fn move_axes(&mut self, horizontal: f32, vertical: f32) {
        AdvancedMovementController::move_axes(self, horizontal, vertical);
    }

    fn jump(
        &mut self,
        body: &mut BasicMovementController,
        _position: Vec2,
        press: bool,
        release: bool,
    ) {
        AdvancedMovementController::jump(self, body, press, release);
    }
}
