//! Grimward - a turn-based survival-horror battle core in Bevy.
//!
//! Walking into a trigger volume starts a battle against one enemy. The
//! player picks a weapon from a tabbed menu, the turn plays out on a fixed
//! beat, and the battle ends in victory, defeat or flight.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Global events, countdown timers
//! - **Items**: Item, weapon and enemy catalog loaded from RON
//! - **Player**: Player stats, control locks
//! - **Inventory**: Slot ledger, starting loadout, pickups
//! - **Battle**: Encounter state machine, battle menu, hit effects, triggers
//! - **UI**: Battle screen, health bars, on-screen messages

pub mod battle;
pub mod core;
pub mod inventory;
pub mod items;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GrimwardPlugin;

impl Plugin for GrimwardPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Catalog data
            .add_plugins(items::ItemsPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Inventory systems
            .add_plugins(inventory::InventoryPlugin)

            // Battle systems
            .add_plugins(battle::BattlePlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
