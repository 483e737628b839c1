//! Grimward - Entry Point
//!
//! Starts a small demo room with one enemy trigger and a box of shells
//! next to the player.
//!
//! Controls:
//! - Arrows / WASD: Move through the battle and inventory menus
//! - Enter / E: Confirm
//! - Escape: Back
//! - Tab: Open / close the inventory

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use grimward::battle::{spawn_battle_trigger, BattleTrigger};
use grimward::inventory::{spawn_pickup, Pickup};
use grimward::player::Player;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grimward".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(grimward::GrimwardPlugin)

        .add_systems(Startup, setup_demo_room)
        .run();
}

/// Camera, player body, a box of shells and a ghoul waiting right where the
/// player stands.
fn setup_demo_room(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands.spawn((
        Player,
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.6, 0.3),
        Transform::from_xyz(0.0, 1.0, 0.0),
    ));

    spawn_battle_trigger(
        &mut commands,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::splat(1.5),
        BattleTrigger::new("ghoul"),
    );

    spawn_pickup(
        &mut commands,
        Vec3::new(0.0, 1.0, 0.0),
        0.5,
        Pickup {
            item_id: "shells".to_string(),
            quantity: 8,
        },
    );
}
