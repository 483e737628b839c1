//! Player control locks.
//!
//! Several systems (battles, the inventory screen, dialogue) need to freeze
//! the player while they are active. Each one holds its own lock id and the
//! player only gets control back once every lock has been released.

use bevy::prelude::*;
use bevy::utils::HashSet;
use bevy::window::{CursorGrabMode, PrimaryWindow};

/// Subsystems that can take control away from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlLockId {
    Battle,
    Inventory,
    Dialogue,
}

/// Set of currently held control locks.
#[derive(Resource, Debug, Default)]
pub struct ControlLocks {
    held: HashSet<ControlLockId>,
}

impl ControlLocks {
    /// Take a lock. Returns `false` if this id already held it.
    pub fn lock(&mut self, id: ControlLockId) -> bool {
        let added = self.held.insert(id);
        if added {
            debug!("Control locked by {:?}", id);
        }
        added
    }

    /// Release a lock. Returns `false` if this id did not hold it.
    pub fn unlock(&mut self, id: ControlLockId) -> bool {
        let removed = self.held.remove(&id);
        if removed {
            debug!("Control released by {:?}", id);
        }
        removed
    }

    pub fn is_locked(&self) -> bool {
        !self.held.is_empty()
    }

    pub fn is_locked_by(&self, id: ControlLockId) -> bool {
        self.held.contains(&id)
    }

    pub fn clear_all(&mut self) {
        self.held.clear();
    }
}

/// Run condition: the player currently has control.
pub fn player_has_control(locks: Res<ControlLocks>) -> bool {
    !locks.is_locked()
}

/// Free the cursor while any lock is held, grab it again once all are gone.
pub fn sync_cursor_with_locks(
    locks: Res<ControlLocks>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !locks.is_changed() {
        return;
    }
    let Ok(mut window) = window_query.get_single_mut() else {
        return;
    };

    if locks.is_locked() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}
