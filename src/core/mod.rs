//! Core game module - shared events and timing primitives.
//!
//! This module provides the foundation that all other game systems build upon.

mod countdown;
mod events;
mod plugin;

pub use countdown::Countdown;
pub use events::*;
pub use plugin::CorePlugin;
