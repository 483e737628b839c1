//! UI module - battle screen, inventory screen, menus and on-screen messages.

mod battle_hud;
mod inventory_screen;
mod messages;
mod plugin;

pub use battle_hud::{
    BattleHudRoot, DamageFlashOverlay, EnemyPortrait, HealthBarFill, HealthBarText, MenuText, MenuWidget,
    WEAPON_SLOT_COUNT,
};
pub use inventory_screen::{
    InventoryScreen, InventoryScreenRoot, InventoryText, InventoryWidget, ScreenAction, INVENTORY_ROW_COUNT,
};
pub use messages::{MessageDisplay, MessageText};
pub use plugin::UiPlugin;
