//! UI plugin - battle screen, inventory screen and player messages.

use bevy::prelude::*;

use super::battle_hud::*;
use super::inventory_screen::{
    navigate_inventory_screen, spawn_inventory_screen, sync_inventory_screen, toggle_inventory_screen,
    InventoryScreen,
};
use super::messages::{show_player_messages, spawn_message_text, MessageDisplay};
use crate::battle::BattleSet;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MessageDisplay>()
            .init_resource::<InventoryScreen>()
            .add_systems(Startup, (spawn_battle_hud, spawn_inventory_screen, spawn_message_text))
            .add_systems(
                Update,
                (
                    toggle_battle_hud,
                    update_health_bars,
                    sync_battle_menu,
                    apply_battle_effects,
                    show_player_messages,
                )
                    .after(BattleSet::Feedback),
            )
            .add_systems(
                Update,
                (toggle_inventory_screen, navigate_inventory_screen, sync_inventory_screen)
                    .chain()
                    .after(BattleSet::Feedback),
            );
    }
}
