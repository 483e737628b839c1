//! Item, weapon and enemy descriptors.
//!
//! Descriptors are immutable catalog data. They are read from RON definition
//! files at startup and never mutated afterwards; the inventory and battle
//! code only refer to them by id.

use serde::Deserialize;

/// Enemy type used for weapon effectiveness matchups.
///
/// `None` means no weapon is ever effective against the enemy, and a weapon
/// whose `effective_against` is `None` never gets its multiplier applied.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyCategory {
    #[default]
    None,
    Demon,
    Ghost,
    Zombie,
}

/// Inventory category of an item.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemCategory {
    #[default]
    Consumable,
    Equipable,
    Key,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [Self::Consumable, Self::Equipable, Self::Key];

    pub fn label(self) -> &'static str {
        match self {
            Self::Consumable => "CONSUMABLES",
            Self::Equipable => "EQUIPMENT",
            Self::Key => "KEY ITEMS",
        }
    }
}

/// Combat stats carried by weapon items.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WeaponStats {
    pub base_damage: u32,
    #[serde(default)]
    pub effective_against: EnemyCategory,
    #[serde(default = "default_multiplier")]
    pub effectiveness_multiplier: f32,
    /// Item id of the ammunition this weapon consumes, if any.
    #[serde(default)]
    pub ammo_type: Option<String>,
}

fn default_multiplier() -> f32 {
    2.0
}

impl WeaponStats {
    /// A weapon requires ammo exactly when it names an ammo type.
    pub fn requires_ammo(&self) -> bool {
        self.ammo_type.is_some()
    }

    /// Damage dealt against an enemy of the given category.
    ///
    /// Matching categories scale `base_damage` by the multiplier and round
    /// half away from zero (22.5 becomes 23). A weapon effective against
    /// `None` never scales, whatever multiplier it stores.
    pub fn effective_damage(&self, target: EnemyCategory) -> u32 {
        if self.effective_against == EnemyCategory::None || self.effective_against != target {
            return self.base_damage;
        }

        let multiplier = self.effectiveness_multiplier.max(0.0);
        (self.base_damage as f32 * multiplier).round() as u32
    }
}

/// Discriminates plain items from weapons.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemKind {
    #[default]
    Item,
    Weapon(WeaponStats),
}

/// A catalog entry for anything that can sit in the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    /// Catalog key (the definition file stem).
    pub id: String,
    pub name: String,
    pub description: String,
    pub max_stack: u32,
    pub category: ItemCategory,
    /// Whether the player may throw the item away.
    pub disposable: bool,
    pub kind: ItemKind,
}

impl ItemDescriptor {
    /// Build a plain (non-weapon) item.
    pub fn item(id: &str, name: &str, category: ItemCategory, max_stack: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            max_stack: max_stack.max(1),
            category,
            disposable: category != ItemCategory::Key,
            kind: ItemKind::Item,
        }
    }

    /// Build a weapon item. Weapons never stack.
    pub fn weapon(id: &str, name: &str, stats: WeaponStats) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            max_stack: 1,
            category: ItemCategory::Equipable,
            disposable: true,
            kind: ItemKind::Weapon(stats),
        }
    }

    pub fn as_weapon(&self) -> Option<&WeaponStats> {
        match &self.kind {
            ItemKind::Weapon(stats) => Some(stats),
            ItemKind::Item => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_))
    }
}

/// Item definition as written in `assets/data/items/*.ron`.
#[derive(Deserialize, Clone, Debug)]
pub struct ItemDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_stackable")]
    pub stackable: bool,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default = "default_disposable")]
    pub disposable: bool,
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
}

fn default_stackable() -> bool {
    true
}

fn default_max_stack() -> u32 {
    99
}

fn default_disposable() -> bool {
    true
}

impl ItemDefinition {
    /// Convert to a catalog descriptor keyed by `id`.
    pub fn into_descriptor(self, id: &str) -> ItemDescriptor {
        let max_stack = if self.stackable && self.weapon.is_none() {
            self.max_stack.max(1)
        } else {
            1
        };

        ItemDescriptor {
            id: id.to_string(),
            name: self.name,
            description: self.description,
            max_stack,
            category: self.category,
            disposable: self.disposable,
            kind: self.weapon.map_or(ItemKind::Item, ItemKind::Weapon),
        }
    }
}

/// An enemy that can be fought in a battle.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EnemyDescriptor {
    /// Catalog key (the definition file stem).
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub max_health: u32,
    pub base_damage: u32,
    #[serde(default)]
    pub category: EnemyCategory,
}
