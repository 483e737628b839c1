//! Inventory module - the item ledger and world pickups.

mod ledger;
mod pickup;
mod plugin;

pub use ledger::{Inventory, InventorySlot, DEFAULT_MAX_SLOTS};
pub use pickup::{spawn_pickup, Pickup, StartingLoadout, MESSAGE_DISPLAY_DURATION};
pub use plugin::InventoryPlugin;
