//! Basic movement: the raycast collision/resolution loop.
//!
//! Every tick the controller integrates gravity into its velocity, sweeps
//! three ray fans (sides, below, above) against the level, clamps the
//! tentative displacement against whatever they hit, and commits the result.
//! Forces issued between two steps are observed by the next step.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::collision::{
    Aabb, CastRay, GameLayer, RayHit, Surface, mask_without, walkable_mask,
};
use crate::core::{ConfigError, Countdown};
use crate::movement::basic::{BasicMovementParameters, ColliderBox, CollisionState, RaySettings};

pub const SMALL_VALUE: f32 = 0.0001;
pub const LARGE_VALUE: f32 = 500_000.0;
/// Side rays start this far inside the top and bottom edges of the collider.
pub const OBSTACLE_HEIGHT_TOLERANCE: f32 = 0.05;
/// Extra downward pull while standing on a moving platform.
pub const MOVING_PLATFORM_GRAVITY: f32 = -150.0;

#[derive(Component, Debug, Clone)]
pub struct BasicMovementController {
    pub default_parameters: BasicMovementParameters,
    override_parameters: Option<BasicMovementParameters>,
    state: CollisionState,
    velocity: Vec2,
    /// Forces issued since the last step; biases the collision response.
    external_force: Vec2,
    fall_slow_factor: f32,
    gravity_active: bool,
    moving_platform_gravity: f32,
    collider: ColliderBox,
    rays: RaySettings,
    /// Layers the body collides with when collisions are on.
    platform_mask: LayerMask,
    active_mask: LayerMask,
    collision_suppression: Countdown,
    pending_translation: Vec2,
    standing_on: Option<Surface>,
}

impl BasicMovementController {
    /// Builds a controller, rejecting collider or ray settings that would
    /// produce a degenerate ray fan.
    pub fn new(
        parameters: BasicMovementParameters,
        collider: ColliderBox,
        rays: RaySettings,
    ) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        collider.validate(&mut errors);
        rays.validate(&mut errors);
        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }

        Ok(Self {
            default_parameters: parameters,
            override_parameters: None,
            state: CollisionState::default(),
            velocity: Vec2::ZERO,
            external_force: Vec2::ZERO,
            fall_slow_factor: 0.0,
            gravity_active: true,
            moving_platform_gravity: 0.0,
            collider,
            rays,
            platform_mask: walkable_mask(),
            active_mask: walkable_mask(),
            collision_suppression: Countdown::default(),
            pending_translation: Vec2::ZERO,
            standing_on: None,
        })
    }

    /// Replaces the set of layers the body collides with. One-way and moving
    /// platform layers keep their special handling if present in the mask.
    pub fn with_platform_mask(mut self, mask: LayerMask) -> Self {
        self.platform_mask = mask;
        self.active_mask = mask;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &CollisionState {
        &self.state
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn collider(&self) -> ColliderBox {
        self.collider
    }

    pub fn rays(&self) -> RaySettings {
        self.rays
    }

    /// The surface under the body at the end of the last step.
    pub fn standing_on(&self) -> Option<Surface> {
        self.standing_on
    }

    pub fn current_parameters(&self) -> &BasicMovementParameters {
        self.override_parameters
            .as_ref()
            .unwrap_or(&self.default_parameters)
    }

    /// Installs (or clears with `None`) parameters that take precedence over
    /// the defaults.
    pub fn set_override_parameters(&mut self, parameters: Option<BasicMovementParameters>) {
        self.override_parameters = parameters;
    }

    /// Gravity currently applied to this body; zero while gravity is switched off.
    pub fn effective_gravity(&self) -> f32 {
        if self.gravity_active {
            self.current_parameters().gravity
        } else {
            0.0
        }
    }

    pub fn gravity_active(&self) -> bool {
        self.gravity_active
    }

    pub fn collisions_enabled(&self) -> bool {
        self.active_mask.0 != 0
    }

    /// Box used for ray origins, for a body at `position`.
    pub fn ray_bounds(&self, position: Vec2) -> Aabb {
        Aabb::from_center_size(position + self.collider.offset(), self.collider.size())
    }

    // -------------------------------------------------------------------------
    // Force API
    // -------------------------------------------------------------------------

    pub fn add_force(&mut self, force: Vec2) {
        self.velocity += force;
        self.external_force += force;
    }

    pub fn add_horizontal_force(&mut self, x: f32) {
        self.velocity.x += x;
        self.external_force.x += x;
    }

    pub fn add_vertical_force(&mut self, y: f32) {
        self.velocity.y += y;
        self.external_force.y += y;
    }

    pub fn set_force(&mut self, force: Vec2) {
        self.velocity = force;
        self.external_force = force;
    }

    pub fn set_horizontal_force(&mut self, x: f32) {
        self.velocity.x = x;
        self.external_force.x = x;
    }

    pub fn set_vertical_force(&mut self, y: f32) {
        self.velocity.y = y;
        self.external_force.y = y;
    }

    /// Multiplies vertical velocity by `factor` every step; 0 disables.
    pub fn slow_fall(&mut self, factor: f32) {
        self.fall_slow_factor = factor;
    }

    pub fn set_gravity_active(&mut self, active: bool) {
        self.gravity_active = active;
    }

    pub fn reset_moving_platforms_gravity(&mut self) {
        self.moving_platform_gravity = 0.0;
    }

    /// Queues a position nudge committed at the start of the next step.
    pub fn translate(&mut self, offset: Vec2) {
        self.pending_translation += offset;
    }

    // -------------------------------------------------------------------------
    // Collision toggles
    // -------------------------------------------------------------------------

    pub fn collisions_on(&mut self) {
        self.collision_suppression.cancel();
        self.active_mask = self.platform_mask;
    }

    pub fn collisions_off(&mut self) {
        self.active_mask = LayerMask(0);
    }

    /// Turns collisions off now and back on once `duration` seconds of steps
    /// have elapsed. Calling it again restarts the window.
    pub fn disable_collisions_for(&mut self, duration: f32) {
        self.collisions_off();
        self.collision_suppression.start(duration);
    }

    /// Ends a pending suppression window early, restoring collisions.
    pub fn cancel_collision_suppression(&mut self) {
        if self.collision_suppression.cancel() {
            self.active_mask = self.platform_mask;
        }
    }

    pub fn collision_suppression_remaining(&self) -> f32 {
        self.collision_suppression.remaining()
    }

    /// Changes the collider size keeping its bottom edge in place.
    pub fn resize_collider(&mut self, size: Vec2) -> Result<(), ConfigError> {
        let resized = ColliderBox {
            width: size.x,
            height: size.y,
            offset_x: self.collider.offset_x,
            offset_y: self.collider.offset_y - (self.collider.height - size.y) * 0.5,
        };
        let mut errors = Vec::new();
        resized.validate(&mut errors);
        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }
        self.collider = resized;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Runs one physics tick for a body at `position` and returns its new
    /// position.
    pub fn step(&mut self, position: Vec2, dt: f32, world: &impl CastRay) -> Vec2 {
        let position = position + std::mem::take(&mut self.pending_translation);

        if self.collision_suppression.tick(dt) {
            self.active_mask = self.platform_mask;
            debug!("Collision suppression ended, collisions restored");
        }

        self.velocity.y += (self.effective_gravity() + self.moving_platform_gravity) * dt;
        if self.fall_slow_factor != 0.0 {
            self.velocity.y *= self.fall_slow_factor;
        }

        let mut delta = self.velocity * dt;

        self.state.begin_tick();
        let bounds = self.ray_bounds(position);

        let direction = if self.velocity.x < 0.0 || self.external_force.x < 0.0 {
            -1.0
        } else {
            1.0
        };
        let stationary = self.velocity.x == 0.0;
        self.cast_rays_to_the_sides(&mut delta, bounds, direction, dt, world);
        // Stationary bodies probe both sides so wall contact is still reported.
        if stationary {
            self.cast_rays_to_the_sides(&mut delta, bounds, -direction, dt, world);
        }

        let carry = self.cast_rays_below(&mut delta, bounds, dt, world);
        self.cast_rays_above(&mut delta, bounds, world);

        let new_position = position + delta;

        if dt > 0.0 {
            self.velocity = (delta - carry) / dt;
        }
        self.external_force = Vec2::ZERO;

        let max_velocity = self.current_parameters().max_velocity();
        self.velocity = self.velocity.clamp(-max_velocity, max_velocity);

        if !self.state.was_grounded_last_frame && self.state.colliding_below {
            self.state.just_got_grounded = true;
        }

        new_position
    }

    /// Casts a vertical column of rays from the collider's center axis toward
    /// `direction`. The first hit steeper than the slope limit acts as a wall.
    fn cast_rays_to_the_sides(
        &mut self,
        delta: &mut Vec2,
        bounds: Aabb,
        direction: f32,
        dt: f32,
        world: &impl CastRay,
    ) {
        let half_width = bounds.size().x * 0.5;
        let offset = self.rays.ray_offset;
        let ray_length = (self.velocity.x * dt).abs() + half_width + offset * 2.0;

        let center = bounds.center();
        let from_bottom = Vec2::new(center.x, bounds.min.y + OBSTACLE_HEIGHT_TOLERANCE);
        let to_top = Vec2::new(center.x, bounds.max.y - OBSTACLE_HEIGHT_TOLERANCE);
        let ray_direction = if direction < 0.0 { Dir2::NEG_X } else { Dir2::X };
        let solid_mask = mask_without(self.active_mask, GameLayer::OneWayPlatform);
        let count = self.rays.horizontal_rays;

        for i in 0..count {
            let origin = from_bottom.lerp(to_top, i as f32 / (count - 1) as f32);
            // Only the lowest ray may catch one-way platforms, and only while grounded.
            let mask = if self.state.was_grounded_last_frame && i == 0 {
                self.active_mask
            } else {
                solid_mask
            };

            let Some(hit) = world.cast_ray(origin, ray_direction, ray_length, mask) else {
                continue;
            };
            if hit.distance <= 0.0 {
                continue;
            }

            let hit_angle = hit.normal.angle_to(Vec2::Y).abs().to_degrees();
            self.state.slope_angle = hit_angle;

            if hit_angle > self.current_parameters().maximum_slope_angle {
                if direction < 0.0 {
                    self.state.colliding_left = true;
                } else {
                    self.state.colliding_right = true;
                }
                self.state.slope_angle_ok = false;

                let reach = (hit.point.x - from_bottom.x).abs() - half_width - offset * 2.0;
                delta.x = if direction <= 0.0 { -reach } else { reach };
                self.velocity.x = 0.0;
                break;
            }
            self.state.slope_angle_ok = true;
        }
    }

    /// Casts rays down from the collider's horizontal extent and lands the body
    /// on the closest hit. Returns the displacement inherited from a moving
    /// platform, which is not part of the body's own velocity.
    fn cast_rays_below(
        &mut self,
        delta: &mut Vec2,
        bounds: Aabb,
        dt: f32,
        world: &impl CastRay,
    ) -> Vec2 {
        self.state.is_falling = delta.y < -SMALL_VALUE;

        if self.effective_gravity() > 0.0 && !self.state.is_falling {
            return Vec2::ZERO;
        }

        let half_height = bounds.size().y * 0.5;
        let offset = self.rays.ray_offset;
        let mut ray_length = half_height + offset;
        if delta.y < 0.0 {
            ray_length += delta.y.abs();
        }

        let center = bounds.center();
        let from_left = Vec2::new(bounds.min.x + delta.x, center.y + offset);
        let to_right = Vec2::new(bounds.max.x + delta.x, center.y + offset);
        let was_grounded = self.state.was_grounded_last_frame;
        let mask = if delta.y > 0.0 && !was_grounded {
            mask_without(self.active_mask, GameLayer::OneWayPlatform)
        } else {
            self.active_mask
        };

        let mut closest: Option<RayHit> = None;
        let count = self.rays.vertical_rays;
        for i in 0..count {
            let origin = from_left.lerp(to_right, i as f32 / (count - 1) as f32);
            let Some(hit) = world.cast_ray(origin, Dir2::NEG_Y, ray_length, mask) else {
                continue;
            };
            if closest.is_none_or(|c| hit.distance < c.distance) {
                closest = Some(hit);
            }
            // Nothing can be closer than the ray origin itself.
            if hit.distance < SMALL_VALUE {
                break;
            }
        }

        let Some(hit) = closest.filter(|c| c.distance < LARGE_VALUE) else {
            self.moving_platform_gravity = 0.0;
            self.state.colliding_below = false;
            self.standing_on = None;
            return Vec2::ZERO;
        };

        // Jumping onto a platform but not high enough: pass through.
        if !was_grounded && hit.distance < half_height {
            self.state.colliding_below = false;
            self.standing_on = None;
            return Vec2::ZERO;
        }

        self.state.is_falling = false;
        self.state.colliding_below = true;

        delta.y = -hit.distance + half_height + offset;

        // An upward impulse issued this tick wins over the ground snap.
        if self.external_force.y > 0.0 {
            delta.y += self.velocity.y * dt;
            self.state.colliding_below = false;
        }
        if !was_grounded && self.velocity.y > 0.0 {
            delta.y += self.velocity.y * dt;
        }
        if delta.y.abs() < SMALL_VALUE {
            delta.y = 0.0;
        }

        self.standing_on = Some(hit.surface);

        if hit.surface.layer == GameLayer::MovingPlatform && self.state.colliding_below {
            self.moving_platform_gravity = MOVING_PLATFORM_GRAVITY;
            self.state.on_moving_platform = true;
            let carry = hit.surface.velocity * dt;
            *delta += carry;
            carry
        } else {
            self.moving_platform_gravity = 0.0;
            Vec2::ZERO
        }
    }

    /// While airborne, casts rays up from the collider's center and stops the
    /// body against a ceiling.
    fn cast_rays_above(&mut self, delta: &mut Vec2, bounds: Aabb, world: &impl CastRay) {
        if self.state.is_grounded() {
            return;
        }

        let half_height = bounds.size().y * 0.5;
        // Shrinks below half the height once descending, releasing the ceiling.
        let ray_length = (half_height + delta.y).max(0.0);

        let center = bounds.center();
        let start = Vec2::new(bounds.min.x + delta.x, center.y);
        let end = Vec2::new(bounds.max.x + delta.x, center.y);
        let mask = mask_without(self.active_mask, GameLayer::OneWayPlatform);

        let count = self.rays.vertical_rays;
        let smallest_distance = (0..count)
            .filter_map(|i| {
                let origin = start.lerp(end, i as f32 / (count - 1) as f32);
                world.cast_ray(origin, Dir2::Y, ray_length, mask)
            })
            .map(|hit| hit.distance)
            .reduce(f32::min);

        let Some(smallest_distance) = smallest_distance else {
            return;
        };

        self.velocity.y = 0.0;
        delta.y = smallest_distance - half_height;
        self.state.colliding_above = true;

        // First contact with a ceiling also kills horizontal motion.
        if !self.state.was_touching_ceiling_last_frame {
            delta.x = 0.0;
            self.velocity.x = 0.0;
        }
    }
}
