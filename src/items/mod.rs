//! Items module - item, weapon and enemy catalog data.

mod catalog;
mod data;
mod error;
mod plugin;

pub use catalog::{load_catalog, load_catalog_from, load_enemy_file, load_item_file, Catalog};
pub use data::*;
pub use error::DataLoadError;
pub use plugin::ItemsPlugin;
