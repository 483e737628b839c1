//! Inventory ledger - stacked item quantities in fixed slots.

use bevy::prelude::*;

use crate::items::{Catalog, ItemCategory, ItemDescriptor, WeaponStats};

/// Default number of inventory slots.
pub const DEFAULT_MAX_SLOTS: usize = 9;

/// One stack of a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlot {
    pub item_id: String,
    pub quantity: u32,
}

/// Player inventory.
///
/// Slots keep insertion order; new stacks are appended at the end and empty
/// stacks are removed, so the ledger never holds a zero-quantity slot.
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
    max_slots: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SLOTS)
    }
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_slots,
        }
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.max_slots
    }

    /// Add up to `quantity` units of `item` and return how many fit.
    ///
    /// Existing stacks are topped up first, then new stacks are opened while
    /// free slots remain. Running out of room is a normal outcome: the caller
    /// gets back a smaller number, possibly zero.
    pub fn add_item(&mut self, item: &ItemDescriptor, quantity: u32) -> u32 {
        let stack_limit = item.max_stack.max(1);
        let mut remaining = quantity;

        for slot in self.slots.iter_mut().filter(|s| s.item_id == item.id) {
            if remaining == 0 {
                break;
            }
            let room = stack_limit.saturating_sub(slot.quantity);
            let moved = room.min(remaining);
            slot.quantity += moved;
            remaining -= moved;
        }

        while remaining > 0 && !self.is_full() {
            let moved = stack_limit.min(remaining);
            self.slots.push(InventorySlot {
                item_id: item.id.clone(),
                quantity: moved,
            });
            remaining -= moved;
        }

        quantity - remaining
    }

    /// Remove `quantity` units of an item.
    ///
    /// Fails without touching the ledger if fewer units are held. Units are
    /// taken from the newest stacks first.
    pub fn consume_item(&mut self, item_id: &str, quantity: u32) -> bool {
        if self.quantity(item_id) < quantity {
            return false;
        }

        let mut remaining = quantity;
        for slot in self.slots.iter_mut().rev().filter(|s| s.item_id == item_id) {
            if remaining == 0 {
                break;
            }
            let taken = slot.quantity.min(remaining);
            slot.quantity -= taken;
            remaining -= taken;
        }

        self.slots.retain(|s| s.quantity > 0);
        true
    }

    pub fn has_item(&self, item_id: &str, quantity: u32) -> bool {
        self.quantity(item_id) >= quantity
    }

    /// Total units held across all stacks, 0 if absent.
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    /// Slots whose item belongs to `category`, in ledger order, paired with
    /// their ledger index.
    pub fn slots_in_category<'a>(
        &'a self,
        catalog: &'a Catalog,
        category: ItemCategory,
    ) -> Vec<(usize, &'a InventorySlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                catalog
                    .item(&slot.item_id)
                    .is_some_and(|item| item.category == category)
            })
            .collect()
    }

    /// Every distinct weapon held, in ledger order.
    pub fn held_weapons<'a>(&self, catalog: &'a Catalog) -> Vec<&'a ItemDescriptor> {
        let mut weapons: Vec<&ItemDescriptor> = Vec::new();
        for slot in &self.slots {
            let Some(item) = catalog.item(&slot.item_id) else {
                continue;
            };
            if item.is_weapon() && !weapons.iter().any(|w| w.id == item.id) {
                weapons.push(item);
            }
        }
        weapons
    }

    /// Whether a weapon can be fired right now.
    ///
    /// Weapons without an ammo type are always usable; the rest need at least
    /// one unit of their ammo in the ledger.
    pub fn can_use(&self, weapon: &WeaponStats) -> bool {
        match &weapon.ammo_type {
            Some(ammo) => self.has_item(ammo, 1),
            None => true,
        }
    }

    /// Throw away the whole stack at `index`. Non-disposable items stay put.
    pub fn discard_slot(&mut self, index: usize, catalog: &Catalog) -> bool {
        let Some(slot) = self.slots.get(index) else {
            return false;
        };
        let disposable = catalog.item(&slot.item_id).is_some_and(|item| item.disposable);
        if !disposable {
            return false;
        }
        self.slots.remove(index);
        true
    }
}
