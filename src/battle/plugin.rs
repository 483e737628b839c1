//! Battle plugin - encounters, the battle menu and hit feedback.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use super::config::{load_battle_config, BattleConfig};
use super::effects::{trigger_battle_effects, update_battle_effects, EnemyHitEffects, PlayerDamageEffects};
use super::input::read_menu_keys;
use super::manager::BattleManager;
use super::menu::{BattleMenu, MenuInput};
use super::recent::{load_recent_weapons, persist_recent_weapons, RecentWeapons};
use super::systems::*;
use super::trigger::detect_battle_triggers;
use crate::player::player_has_control;

/// Battle plugin - owns the battle manager and everything that drives it.
pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<BattleConfig>()
            .init_resource::<BattleManager>()
            .init_resource::<BattleMenu>()
            .init_resource::<RecentWeapons>()
            .init_resource::<EnemyHitEffects>()
            .init_resource::<PlayerDamageEffects>()

            // Events
            .add_event::<MenuInput>()
            .add_event::<CollisionEvent>()

            // Setup
            .add_systems(PreStartup, load_battle_config)
            .add_systems(Startup, (setup_battle_manager, load_recent_weapons))

            // System ordering
            .configure_sets(
                Update,
                (BattleSet::Input, BattleSet::Resolve, BattleSet::Feedback).chain(),
            )

            // Input systems
            .add_systems(
                Update,
                (
                    read_menu_keys,
                    detect_battle_triggers.run_if(player_has_control),
                    handle_start_requests,
                )
                    .chain()
                    .in_set(BattleSet::Input),
            )

            // Turn systems
            .add_systems(
                Update,
                (handle_menu_input, advance_battle, forward_battle_signals)
                    .chain()
                    .in_set(BattleSet::Resolve),
            )

            // Feedback systems
            .add_systems(
                Update,
                (trigger_battle_effects, update_battle_effects, persist_recent_weapons)
                    .chain()
                    .in_set(BattleSet::Feedback),
            );
    }
}
