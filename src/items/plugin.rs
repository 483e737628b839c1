//! Items plugin - loads the catalog before anything else needs it.

use bevy::prelude::*;

use super::catalog::{load_catalog, Catalog};

/// Items plugin - owns the `Catalog` resource.
pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Catalog>()
            .add_systems(PreStartup, load_catalog);
    }
}
