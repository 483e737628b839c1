//! Player plugin - player stats and control locks.

use bevy::prelude::*;

use super::components::*;
use super::control::{sync_cursor_with_locks, ControlLocks};

/// Player plugin - owns the player's health and the control lock set.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerStats>()
            .init_resource::<ControlLocks>()
            .add_systems(PostUpdate, sync_cursor_with_locks);
    }
}
