//! World pickups and the starting loadout.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;
use std::fs;

use super::ledger::{Inventory, DEFAULT_MAX_SLOTS};
use crate::core::{ItemPickupEvent, PlayerMessage};
use crate::items::Catalog;
use crate::player::Player;

/// Seconds an inventory message stays on screen.
pub const MESSAGE_DISPLAY_DURATION: f32 = 2.0;

/// A world entity the player can pick up.
///
/// When the inventory only has room for part of the stack, the rest stays
/// in the world with a reduced `quantity`.
#[derive(Component, Debug, Clone)]
pub struct Pickup {
    pub item_id: String,
    pub quantity: u32,
}

/// Inventory setup loaded from assets/data/inventory/starting_loadout.ron.
#[derive(Clone, Debug, Deserialize)]
pub struct StartingLoadout {
    #[serde(default = "default_max_slots")]
    pub max_slots: usize,
    #[serde(default)]
    pub items: Vec<(String, u32)>,
}

fn default_max_slots() -> usize {
    DEFAULT_MAX_SLOTS
}

impl Default for StartingLoadout {
    fn default() -> Self {
        Self {
            max_slots: DEFAULT_MAX_SLOTS,
            items: Vec::new(),
        }
    }
}

impl StartingLoadout {
    /// Load the starting loadout from its RON file.
    pub fn load() -> Self {
        let path = "assets/data/inventory/starting_loadout.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(loadout) => {
                    info!("Loaded starting loadout from {}", path);
                    loadout
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Starting empty.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Starting empty.", path, e);
                Self::default()
            }
        }
    }

    /// Build an inventory holding the loadout items.
    pub fn build_inventory(&self, catalog: &Catalog) -> Inventory {
        let mut inventory = Inventory::new(self.max_slots);
        for (item_id, quantity) in &self.items {
            let Some(item) = catalog.item(item_id) else {
                warn!("Starting loadout names unknown item '{}'", item_id);
                continue;
            };
            let added = inventory.add_item(item, *quantity);
            if added < *quantity {
                warn!(
                    "Starting loadout overflowed: kept {} of {} {}",
                    added, quantity, item.name
                );
            }
        }
        inventory
    }
}

/// Startup system that fills the inventory from the starting loadout.
pub fn setup_inventory(mut commands: Commands, catalog: Res<Catalog>) {
    let loadout = StartingLoadout::load();
    commands.insert_resource(loadout.build_inventory(&catalog));
}

/// Spawn a ball-shaped pickup sensor.
pub fn spawn_pickup(commands: &mut Commands, position: Vec3, radius: f32, pickup: Pickup) -> Entity {
    commands
        .spawn((
            pickup,
            Collider::ball(radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            Transform::from_translation(position),
        ))
        .id()
}

/// Turn player contact with a pickup into a pickup event.
pub fn detect_pickup_contacts(
    mut collisions: EventReader<CollisionEvent>,
    pickups: Query<&Pickup>,
    players: Query<(), With<Player>>,
    mut events: EventWriter<ItemPickupEvent>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _) = collision else {
            continue;
        };

        let (source, other) = if pickups.contains(*a) {
            (*a, *b)
        } else if pickups.contains(*b) {
            (*b, *a)
        } else {
            continue;
        };

        if !players.contains(other) {
            continue;
        }
        let Ok(pickup) = pickups.get(source) else {
            continue;
        };

        events.send(ItemPickupEvent {
            source: Some(source),
            item_id: pickup.item_id.clone(),
            quantity: pickup.quantity,
        });
    }
}

/// Move picked-up items into the inventory.
pub fn handle_item_pickups(
    mut commands: Commands,
    mut pickup_events: EventReader<ItemPickupEvent>,
    mut messages: EventWriter<PlayerMessage>,
    mut inventory: ResMut<Inventory>,
    catalog: Res<Catalog>,
    mut pickups: Query<&mut Pickup>,
) {
    for event in pickup_events.read() {
        let Some(item) = catalog.item(&event.item_id) else {
            warn!("Pickup references unknown item '{}'", event.item_id);
            continue;
        };

        let added = inventory.add_item(item, event.quantity);

        if added == 0 {
            messages.send(PlayerMessage::new(
                "Could not pick up the item, inventory full",
                MESSAGE_DISPLAY_DURATION,
            ));
        } else if added < event.quantity {
            info!("Picked up {} of {} {}", added, event.quantity, item.name);
            if let Some(mut pickup) = event.source.and_then(|e| pickups.get_mut(e).ok()) {
                pickup.quantity = event.quantity - added;
            }
            messages.send(PlayerMessage::new(
                "Could not pick up everything, inventory full",
                MESSAGE_DISPLAY_DURATION,
            ));
        } else {
            info!("Picked up {} x{}", item.name, added);
            if let Some(source) = event.source {
                commands.entity(source).despawn_recursive();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CorePlugin;
    use crate::items::{ItemCategory, ItemDescriptor};
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    fn pickup_app(max_slots: usize) -> App {
        let mut catalog = Catalog::default();
        catalog.insert_item(ItemDescriptor::item("herb", "Herb", ItemCategory::Consumable, 3));

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, CorePlugin))
            .insert_resource(catalog)
            .insert_resource(Inventory::new(max_slots))
            .add_systems(Update, handle_item_pickups);
        app
    }

    fn send_pickup(app: &mut App, source: Option<Entity>, quantity: u32) {
        app.world_mut().send_event(ItemPickupEvent {
            source,
            item_id: "herb".to_string(),
            quantity,
        });
        app.update();
    }

    #[test]
    fn test_shipped_loadout_fits_its_slots() {
        let catalog = crate::items::load_catalog_from(
            std::path::Path::new("assets/data/items"),
            std::path::Path::new("assets/data/enemies"),
        );
        let loadout = StartingLoadout::load();
        let inventory = loadout.build_inventory(&catalog);

        assert_eq!(inventory.slots().len(), loadout.items.len());
        assert_eq!(inventory.quantity("bullets"), 6);
        assert!(inventory.has_item("knife", 1));
    }

    #[test]
    fn test_full_pickup_despawns_source() {
        let mut app = pickup_app(9);
        let source = app
            .world_mut()
            .spawn(Pickup {
                item_id: "herb".to_string(),
                quantity: 2,
            })
            .id();

        send_pickup(&mut app, Some(source), 2);

        assert!(app.world().get::<Pickup>(source).is_none());
        assert_eq!(app.world().resource::<Inventory>().quantity("herb"), 2);
    }

    #[test]
    fn test_partial_pickup_leaves_remainder() {
        let mut app = pickup_app(1);
        let source = app
            .world_mut()
            .spawn(Pickup {
                item_id: "herb".to_string(),
                quantity: 5,
            })
            .id();

        send_pickup(&mut app, Some(source), 5);

        let remaining = app.world().get::<Pickup>(source).unwrap().quantity;
        assert_eq!(remaining, 2);
        assert_eq!(app.world().resource::<Inventory>().quantity("herb"), 3);

        let messages = app.world().resource::<Events<PlayerMessage>>();
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_player_contact_collects_pickup() {
        let mut app = pickup_app(9);
        app.add_event::<CollisionEvent>()
            .add_systems(Update, detect_pickup_contacts.before(handle_item_pickups));

        let player = app.world_mut().spawn(Player).id();
        let herb = app
            .world_mut()
            .spawn(Pickup {
                item_id: "herb".to_string(),
                quantity: 3,
            })
            .id();
        let bystander = app.world_mut().spawn_empty().id();

        app.world_mut()
            .send_event(CollisionEvent::Started(bystander, herb, CollisionEventFlags::empty()));
        app.update();
        assert_eq!(app.world().resource::<Inventory>().quantity("herb"), 0);

        app.world_mut()
            .send_event(CollisionEvent::Started(herb, player, CollisionEventFlags::empty()));
        app.update();

        assert_eq!(app.world().resource::<Inventory>().quantity("herb"), 3);
        assert!(app.world().get::<Pickup>(herb).is_none());
    }

    #[test]
    fn test_loadout_builds_inventory() {
        let mut catalog = Catalog::default();
        catalog.insert_item(ItemDescriptor::item("herb", "Herb", ItemCategory::Consumable, 3));
        let loadout = StartingLoadout {
            max_slots: 2,
            items: vec![("herb".to_string(), 4), ("ghost".to_string(), 1)],
        };

        let inventory = loadout.build_inventory(&catalog);
        assert_eq!(inventory.max_slots(), 2);
        assert_eq!(inventory.quantity("herb"), 4);
        assert_eq!(inventory.slots().len(), 2);
    }
}
