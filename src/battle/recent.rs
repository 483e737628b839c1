//! Recently used weapons, persisted between sessions.

use bevy::prelude::*;
use ron::ser::PrettyConfig;
use std::fs;
use std::path::{Path, PathBuf};

use crate::items::DataLoadError;

/// Maximum number of weapons remembered in the Used tab.
pub const MAX_RECENT_WEAPONS: usize = 9;

/// Weapon ids, most recently used first.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RecentWeapons {
    ids: Vec<String>,
}

impl RecentWeapons {
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut recent = Self::default();
        for id in ids.into_iter().rev() {
            recent.record(&id);
        }
        recent
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Move `weapon_id` to the front, evicting the oldest entry past the cap.
    pub fn record(&mut self, weapon_id: &str) {
        self.ids.retain(|id| id != weapon_id);
        self.ids.insert(0, weapon_id.to_string());
        self.ids.truncate(MAX_RECENT_WEAPONS);
    }

    /// Read the saved list. A missing file means no history yet.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let ids: Vec<String> = ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Ok(Self::from_ids(ids))
    }

    pub fn save(&self, path: &Path) -> Result<(), DataLoadError> {
        let contents = ron::ser::to_string_pretty(&self.ids, PrettyConfig::default()).map_err(|e| {
            DataLoadError::SerializeError {
                path: path.display().to_string(),
                details: e.to_string(),
            }
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DataLoadError::WriteError {
                path: parent.display().to_string(),
                details: e.to_string(),
            })?;
        }
        fs::write(path, contents).map_err(|e| DataLoadError::WriteError {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }
}

/// Location of the saved weapon history.
#[derive(Resource, Debug, Clone)]
pub struct RecentWeaponsStore {
    pub path: PathBuf,
}

/// Startup system that restores the weapon history.
pub fn load_recent_weapons(mut commands: Commands, config: Res<super::BattleConfig>) {
    let path = PathBuf::from(&config.recent_weapons_path);
    let recent = match RecentWeapons::load(&path) {
        Ok(recent) => {
            info!("Restored {} recently used weapon(s)", recent.ids().len());
            recent
        }
        Err(e) => {
            warn!("{}. Starting with an empty weapon history.", e);
            RecentWeapons::default()
        }
    };

    commands.insert_resource(recent);
    commands.insert_resource(RecentWeaponsStore { path });
}

/// Save the weapon history whenever it changes.
pub fn persist_recent_weapons(recent: Res<RecentWeapons>, store: Option<Res<RecentWeaponsStore>>) {
    if !recent.is_changed() || recent.is_added() {
        return;
    }
    let Some(store) = store else {
        return;
    };

    if let Err(e) = recent.save(&store.path) {
        error!("Failed to save weapon history: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_moves_weapon_to_front() {
        let mut recent = RecentWeapons::default();
        recent.record("knife");
        recent.record("pistol");
        recent.record("knife");
        assert_eq!(recent.ids(), ["knife", "pistol"]);
    }

    #[test]
    fn test_tenth_weapon_evicts_oldest() {
        let mut recent = RecentWeapons::default();
        for i in 0..9 {
            recent.record(&format!("weapon_{i}"));
        }
        assert_eq!(recent.ids().len(), 9);

        recent.record("weapon_new");
        assert_eq!(recent.ids().len(), 9);
        assert_eq!(recent.ids()[0], "weapon_new");
        assert!(!recent.ids().iter().any(|id| id == "weapon_0"));
        assert_eq!(recent.ids()[8], "weapon_1");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("grimward-recent-{}", std::process::id()))
            .join("recent_weapons.ron");

        let mut recent = RecentWeapons::default();
        recent.record("axe");
        recent.record("crossbow");
        recent.save(&path).unwrap();

        let restored = RecentWeapons::load(&path).unwrap();
        assert_eq!(restored, recent);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let recent = RecentWeapons::load(Path::new("no/such/history.ron")).unwrap();
        assert!(recent.ids().is_empty());
    }

    #[test]
    fn test_from_ids_caps_and_dedupes() {
        let ids: Vec<String> = ["a", "b", "a", "c", "d", "e", "f", "g", "h", "i", "j", "k"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let recent = RecentWeapons::from_ids(ids);
        assert_eq!(recent.ids().len(), 9);
        assert_eq!(recent.ids()[0], "a");
        assert_eq!(recent.ids()[1], "b");
    }
}
