//! Battle module - encounter state machine, battle menu and feedback effects.

mod config;
mod effects;
mod input;
mod manager;
mod menu;
mod plugin;
mod recent;
mod systems;
mod trigger;

pub use config::BattleConfig;
pub use effects::{EnemyHitEffects, PlayerDamageEffects, ScreenShake};
pub use manager::{BattleManager, BattlePhase, BattleSignal, EncounterState, TurnStep, PLAYER_DISPLAY_NAME};
pub use menu::{
    filter_weapons, BattleMenu, MainMenuOption, MenuInput, MenuOutcome, MenuScreen, WeaponEntry, WeaponTab,
};
pub use plugin::BattlePlugin;
pub use recent::{RecentWeapons, RecentWeaponsStore, MAX_RECENT_WEAPONS};
pub use systems::BattleSet;
pub use trigger::{spawn_battle_trigger, BattleTrigger};
