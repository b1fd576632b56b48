//! Movement domain: per-tick systems driving the two controllers.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::collections::HashSet;

use crate::collision::{AvianRaycaster, Ladder, Platform};
use crate::core::{DashStartedEvent, JumpKind, JumpedEvent, LandedEvent};
use crate::movement::advanced::{AbilityEvent, AdvancedMovementController, AnimatorParameters};
use crate::movement::basic::BasicMovementController;
use crate::movement::{Controlled, Facing, MovementInput};

pub(crate) fn detect_ladders(
    ladders: Query<(&Transform, &Ladder)>,
    mut characters: Query<(
        &Transform,
        &BasicMovementController,
        &mut AdvancedMovementController,
    )>,
) {
    for (transform, body, mut abilities) in &mut characters {
        let bounds = body.ray_bounds(transform.translation.truncate());

        let (mut colliding, mut top_colliding) = (false, false);
        for (ladder_transform, ladder) in &ladders {
            let (inside, top) = ladder.contact(ladder_transform.translation.truncate(), &bounds);
            colliding |= inside;
            top_colliding |= top;
        }
        abilities.set_ladder_contact(colliding, top_colliding);
    }
}

/// The controlled body gets the sampled input. Every other body gets idle
/// input, with the jump released on the tick it lost control.
pub(crate) fn apply_player_input(
    input: Res<MovementInput>,
    mut released: RemovedComponents<Controlled>,
    mut query: Query<(
        Entity,
        &mut BasicMovementController,
        &mut AdvancedMovementController,
        Has<Controlled>,
    )>,
) {
    let released: HashSet<Entity> = released.read().collect();

    for (entity, mut body, mut abilities, controlled) in &mut query {
        let intent = if controlled {
            *input
        } else {
            MovementInput {
                jump_just_released: released.contains(&entity),
                ..Default::default()
            }
        };
        abilities.handle_input(&mut body, &intent);
    }
}

pub(crate) fn update_abilities(
    time: Res<Time>,
    mut query: Query<(&mut BasicMovementController, &mut AdvancedMovementController)>,
) {
    let dt = time.delta_secs();

    for (mut body, mut abilities) in &mut query {
        abilities.early_update(&mut body, dt);
    }
}

/// Integrates every body against Avian's spatial index and commits the
/// resulting positions.
pub(crate) fn step_bodies(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    platforms: Query<&Platform>,
    mut bodies: Query<(Entity, &mut Transform, &mut BasicMovementController)>,
    mut landed: MessageWriter<LandedEvent>,
) {
    let dt = time.delta_secs();
    let lookup = |entity: Entity| platforms.get(entity).ok().copied();

    for (entity, mut transform, mut body) in &mut bodies {
        let raycaster = AvianRaycaster::new(&spatial_query, &lookup).excluding(entity);
        let falling_speed = body.velocity().y;

        let position = body.step(transform.translation.truncate(), dt, &raycaster);
        transform.translation = position.extend(transform.translation.z);

        if body.state().just_got_grounded {
            debug!(
                "Landed: entity={:?}, standing_on={:?}",
                entity,
                body.standing_on().map(|surface| surface.layer)
            );
            landed.write(LandedEvent {
                entity,
                impact_speed: falling_speed.abs(),
            });
        }
    }
}

/// Post-physics ability bookkeeping, animator parameters, and the ability
/// messages queued during the tick.
pub(crate) fn finish_abilities(
    mut query: Query<(
        Entity,
        &BasicMovementController,
        &mut AdvancedMovementController,
        Option<&mut AnimatorParameters>,
    )>,
    mut jumped: MessageWriter<JumpedEvent>,
    mut dashed: MessageWriter<DashStartedEvent>,
) {
    for (entity, body, mut abilities, animator) in &mut query {
        let frame = abilities.late_update(body);
        if let Some(mut animator) = animator {
            frame.apply(&mut *animator);
        }

        for event in abilities.drain_events() {
            match event {
                AbilityEvent::Jumped { kind, jumps_left } => {
                    if kind == JumpKind::DropThrough {
                        debug!("Dropping through platform: entity={:?}", entity);
                    } else {
                        debug!(
                            "Jump: entity={:?}, kind={:?}, jumps_left={}",
                            entity, kind, jumps_left
                        );
                    }
                    jumped.write(JumpedEvent {
                        entity,
                        kind,
                        jumps_left,
                    });
                }
                AbilityEvent::DashStarted { dive } => {
                    debug!("Dash started: entity={:?}, dive={}", entity, dive);
                    dashed.write(DashStartedEvent { entity, dive });
                }
            }
        }
    }
}

/// Sprites follow the collider (crouching shrinks it) and the facing.
pub(crate) fn update_sprites(
    mut query: Query<(
        &BasicMovementController,
        Option<&AdvancedMovementController>,
        &mut Sprite,
    )>,
) {
    for (body, abilities, mut sprite) in &mut query {
        sprite.custom_size = Some(body.collider().size());
        if let Some(abilities) = abilities {
            sprite.flip_x = abilities.facing() == Facing::Left;
        }
    }
}
