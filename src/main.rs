use avian2d::prelude::*;
use bevy::prelude::*;

use raycast_platformer::{content, core, movement, patrol};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Raycast Platformer".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
        patrol::PatrolPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(raycast_platformer::dev::DevPlugin);

    app.run();
}
