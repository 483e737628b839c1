//! Core plugin that registers the global events.

use bevy::prelude::*;

use super::events::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin registers the events the battle, inventory and UI modules
/// use to talk to each other.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StartBattleRequest>()
            .add_event::<BattleStartedEvent>()
            .add_event::<BattleEndedEvent>()
            .add_event::<HealthBarUpdate>()
            .add_event::<EnemyHitEvent>()
            .add_event::<PlayerDamagedEvent>()
            .add_event::<ItemPickupEvent>()
            .add_event::<PlayerMessage>();
    }
}
