//! Global events used for cross-system communication.
//!
//! The battle state machine never touches presentation directly. It reports
//! what happened through these events and the UI, effect and inventory
//! systems react to them.

use bevy::prelude::*;

/// Which side of a battle a health bar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combatant {
    Player,
    Enemy,
}

/// How an encounter ended. Teardown is identical for every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The player chose Run or Items from the main menu.
    Fled,
}

/// Sent by world triggers to ask for an encounter with a catalog enemy.
#[derive(Event, Debug, Clone)]
pub struct StartBattleRequest {
    pub enemy_id: String,
}

/// Sent once an encounter has actually begun.
#[derive(Event, Debug, Clone)]
pub struct BattleStartedEvent {
    pub enemy_id: String,
}

/// Sent after an encounter has been torn down.
#[derive(Event, Debug, Clone)]
pub struct BattleEndedEvent {
    pub outcome: BattleOutcome,
}

/// New values for one of the battle health bars.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HealthBarUpdate {
    pub side: Combatant,
    pub name: String,
    pub current: u32,
    pub max: u32,
}

impl HealthBarUpdate {
    /// Text shown next to the bar, e.g. `"35 / 50"`.
    pub fn label(&self) -> String {
        format!("{} / {}", self.current, self.max)
    }

    /// Fill amount in `[0, 1]`; an empty maximum renders as an empty bar.
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

/// The enemy was struck by the player.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct EnemyHitEvent;

/// The player was struck by the enemy.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerDamagedEvent;

/// Sent when the player picks up an item from the world.
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    /// World entity holding the pickup, if any.
    pub source: Option<Entity>,
    pub item_id: String,
    pub quantity: u32,
}

/// Short informational text for the player (inventory full, out of ammo...).
#[derive(Event, Debug, Clone)]
pub struct PlayerMessage {
    pub text: String,
    /// Seconds the message stays on screen.
    pub duration: f32,
}

impl PlayerMessage {
    pub fn new(text: impl Into<String>, duration: f32) -> Self {
        Self {
            text: text.into(),
            duration,
        }
    }
}
