//! Movement domain tests: shared control helpers and input routing between
//! bodies.

use bevy::prelude::*;

use super::systems::{apply_player_input, update_abilities};
use super::*;
use crate::movement::advanced::{AdvancedMovementParameters, AdvancedMovementPermissions};
use crate::movement::basic::{BasicMovementParameters, ColliderBox, RaySettings};

#[test]
fn test_deadzone_is_exclusive() {
    assert_eq!(deadzone(0.1), 0.0);
    assert_eq!(deadzone(-0.05), 0.0);
    assert_eq!(deadzone(0.11), 0.11);
    assert_eq!(deadzone(-1.0), -1.0);
}

// -----------------------------------------------------------------------------
// Control handoff
// -----------------------------------------------------------------------------

fn input_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<MovementInput>();
    app.add_systems(Update, (apply_player_input, update_abilities).chain());
    app
}

fn spawn_character(app: &mut App) -> Entity {
    let body = BasicMovementController::new(
        BasicMovementParameters::default(),
        ColliderBox::new(Vec2::new(1.0, 2.0)),
        RaySettings::default(),
    )
    .unwrap();
    let abilities = AdvancedMovementController::new(
        AdvancedMovementParameters {
            smooth_movement: false,
            ..Default::default()
        },
        AdvancedMovementPermissions::default(),
    )
    .unwrap();
    app.world_mut().spawn((Controlled, body, abilities)).id()
}

fn horizontal_velocity(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<BasicMovementController>(entity)
        .unwrap()
        .velocity()
        .x
}

#[test]
fn test_controlled_body_follows_input() {
    let mut app = input_app();
    let player = spawn_character(&mut app);

    app.world_mut().resource_mut::<MovementInput>().axis = Vec2::X;
    app.update();

    assert_eq!(horizontal_velocity(&app, player), 8.0);
}

#[test]
fn test_body_idles_after_losing_control() {
    let mut app = input_app();
    let player = spawn_character(&mut app);

    app.world_mut().resource_mut::<MovementInput>().axis = Vec2::X;
    app.update();
    assert_eq!(horizontal_velocity(&app, player), 8.0);

    app.world_mut().entity_mut(player).remove::<Controlled>();
    // Still holding right: the input now belongs to another body.
    for _ in 0..5 {
        app.update();
    }

    assert_eq!(horizontal_velocity(&app, player), 0.0);
    let abilities = app.world().get::<AdvancedMovementController>(player).unwrap();
    assert_eq!(abilities.facing(), Facing::Right);
}

#[test]
fn test_uncontrolled_body_ignores_jump_presses() {
    let mut app = input_app();
    let player = spawn_character(&mut app);
    app.world_mut().entity_mut(player).remove::<Controlled>();

    *app.world_mut().resource_mut::<MovementInput>() = MovementInput::jump();
    app.update();

    let abilities = app.world().get::<AdvancedMovementController>(player).unwrap();
    assert!(!abilities.state().jumping);
    assert_eq!(abilities.state().number_of_jumps_left, 3);
}
