//! World trigger volumes that start battles when the player walks into them.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::StartBattleRequest;
use crate::player::Player;

/// Sensor volume that starts a battle against a catalog enemy.
#[derive(Component, Debug, Clone)]
pub struct BattleTrigger {
    pub enemy_id: String,
    /// Fire once, then switch the sensor off.
    pub disable_after_trigger: bool,
    pub triggered: bool,
}

impl BattleTrigger {
    pub fn new(enemy_id: impl Into<String>) -> Self {
        Self {
            enemy_id: enemy_id.into(),
            disable_after_trigger: true,
            triggered: false,
        }
    }
}

/// Spawn a box-shaped battle trigger.
pub fn spawn_battle_trigger(
    commands: &mut Commands,
    position: Vec3,
    half_extents: Vec3,
    trigger: BattleTrigger,
) -> Entity {
    commands
        .spawn((
            trigger,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            Transform::from_translation(position),
        ))
        .id()
}

/// Turn collisions between the player and trigger volumes into battle requests.
pub fn detect_battle_triggers(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    mut triggers: Query<&mut BattleTrigger>,
    players: Query<(), With<Player>>,
    mut requests: EventWriter<StartBattleRequest>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _) = collision else {
            continue;
        };

        let (trigger_entity, other) = if triggers.contains(*a) {
            (*a, *b)
        } else if triggers.contains(*b) {
            (*b, *a)
        } else {
            continue;
        };

        if !players.contains(other) {
            continue;
        }

        let Ok(mut trigger) = triggers.get_mut(trigger_entity) else {
            continue;
        };
        if trigger.triggered {
            continue;
        }

        info!("Player entered battle trigger for {}", trigger.enemy_id);
        requests.send(StartBattleRequest {
            enemy_id: trigger.enemy_id.clone(),
        });

        if trigger.disable_after_trigger {
            trigger.triggered = true;
            commands.entity(trigger_entity).remove::<Collider>();
        }
    }
}
