//! Inventory plugin - ledger setup and pickup handling.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use super::ledger::Inventory;
use super::pickup::{detect_pickup_contacts, handle_item_pickups, setup_inventory};

/// Inventory plugin - owns the `Inventory` resource.
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventory>()
            .add_event::<CollisionEvent>()
            // The catalog is loaded in PreStartup, so the loadout can resolve ids
            .add_systems(Startup, setup_inventory)
            .add_systems(Update, (detect_pickup_contacts, handle_item_pickups).chain());
    }
}
