//! Player module - player stats and control locking.

mod components;
mod control;
mod plugin;

pub use components::*;
pub use control::{player_has_control, ControlLockId, ControlLocks};
pub use plugin::PlayerPlugin;
