//! Item and enemy catalog loaded from RON files.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::data::{EnemyDescriptor, ItemDefinition, ItemDescriptor, WeaponStats};
use super::error::DataLoadError;

const ITEMS_DIR: &str = "assets/data/items";
const ENEMIES_DIR: &str = "assets/data/enemies";

/// Resource holding every item, weapon and enemy definition.
#[derive(Resource, Default, Debug)]
pub struct Catalog {
    items: HashMap<String, ItemDescriptor>,
    enemies: HashMap<String, EnemyDescriptor>,
}

impl Catalog {
    pub fn item(&self, id: &str) -> Option<&ItemDescriptor> {
        self.items.get(id)
    }

    /// Look up an item and return its weapon stats if it is a weapon.
    pub fn weapon(&self, id: &str) -> Option<&WeaponStats> {
        self.items.get(id).and_then(ItemDescriptor::as_weapon)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyDescriptor> {
        self.enemies.get(id)
    }

    pub fn insert_item(&mut self, item: ItemDescriptor) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn insert_enemy(&mut self, enemy: EnemyDescriptor) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Check that every weapon's ammo type exists in the catalog and that
    /// health and damage values are positive.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        for enemy in self.enemies.values() {
            check_enemy(enemy, &enemy.id)?;
        }
        for item in self.items.values() {
            if let Some(weapon) = item.as_weapon() {
                check_weapon(weapon, &item.id)?;
            }
            let Some(ammo) = item.as_weapon().and_then(|w| w.ammo_type.as_ref()) else {
                continue;
            };
            if !self.items.contains_key(ammo) {
                return Err(DataLoadError::UnknownReference {
                    item: item.id.clone(),
                    reference: ammo.clone(),
                });
            }
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }
    fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

fn require_positive(source: &str, field: &str, value: u32) -> Result<(), DataLoadError> {
    if value == 0 {
        return Err(DataLoadError::InvalidValue {
            path: source.to_string(),
            details: format!("{} must be greater than 0", field),
        });
    }
    Ok(())
}

fn check_enemy(enemy: &EnemyDescriptor, source: &str) -> Result<(), DataLoadError> {
    require_positive(source, "max_health", enemy.max_health)?;
    require_positive(source, "base_damage", enemy.base_damage)
}

fn check_weapon(weapon: &WeaponStats, source: &str) -> Result<(), DataLoadError> {
    require_positive(source, "base_damage", weapon.base_damage)
}

fn file_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse a single item definition file. The file stem becomes the item id.
pub fn load_item_file(path: &Path) -> Result<ItemDescriptor, DataLoadError> {
    let contents = read_file(path)?;
    let definition: ItemDefinition =
        ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
    if let Some(weapon) = &definition.weapon {
        check_weapon(weapon, &path.display().to_string())?;
    }
    Ok(definition.into_descriptor(&file_id(path)))
}

/// Parse a single enemy definition file. The file stem becomes the enemy id.
pub fn load_enemy_file(path: &Path) -> Result<EnemyDescriptor, DataLoadError> {
    let contents = read_file(path)?;
    let mut enemy: EnemyDescriptor =
        ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
    check_enemy(&enemy, &path.display().to_string())?;
    enemy.id = file_id(path);
    Ok(enemy)
}

/// Collect the `.ron` files of a directory, sorted for stable load order.
fn ron_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        warn!("Failed to read data directory {:?}", dir);
        return Vec::new();
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    paths.sort();
    paths
}

/// Load every item and enemy definition found under the given directories.
///
/// Broken files are logged and skipped so one bad definition does not take
/// the rest of the catalog down with it.
pub fn load_catalog_from(items_dir: &Path, enemies_dir: &Path) -> Catalog {
    let mut catalog = Catalog::default();

    if items_dir.exists() {
        for path in ron_files(items_dir) {
            match load_item_file(&path) {
                Ok(item) => {
                    debug!("Loaded item definition: {} ({})", item.name, item.id);
                    catalog.insert_item(item);
                }
                Err(e) => error!("{}", e),
            }
        }
    } else {
        warn!("Item definitions directory not found: {:?}", items_dir);
    }

    if enemies_dir.exists() {
        for path in ron_files(enemies_dir) {
            match load_enemy_file(&path) {
                Ok(enemy) => {
                    debug!("Loaded enemy definition: {} ({})", enemy.name, enemy.id);
                    catalog.insert_enemy(enemy);
                }
                Err(e) => error!("{}", e),
            }
        }
    } else {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
    }

    if let Err(e) = catalog.validate() {
        warn!("Catalog validation failed: {}", e);
    }

    info!(
        "Loaded {} item(s) and {} enemy definition(s)",
        catalog.item_count(),
        catalog.enemy_count()
    );
    catalog
}

/// Startup system that loads the catalog from `assets/data`.
pub fn load_catalog(mut commands: Commands) {
    let catalog = load_catalog_from(Path::new(ITEMS_DIR), Path::new(ENEMIES_DIR));
    commands.insert_resource(catalog);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{EnemyCategory, ItemCategory};

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("grimward-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_validate_reports_missing_ammo() {
        let mut catalog = Catalog::default();
        catalog.insert_item(ItemDescriptor::weapon(
            "pistol",
            "Pistol",
            WeaponStats {
                base_damage: 8,
                effective_against: EnemyCategory::None,
                effectiveness_multiplier: 1.0,
                ammo_type: Some("bullets".to_string()),
            },
        ));

        assert!(matches!(
            catalog.validate(),
            Err(DataLoadError::UnknownReference { .. })
        ));

        catalog.insert_item(ItemDescriptor::item("bullets", "Bullets", ItemCategory::Consumable, 30));
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_load_catalog_from_directories() {
        let root = scratch_dir("catalog");
        let items = root.join("items");
        let enemies = root.join("enemies");
        fs::create_dir_all(&items).unwrap();
        fs::create_dir_all(&enemies).unwrap();

        fs::write(
            items.join("knife.ron"),
            r#"(name: "Knife", weapon: Some((base_damage: 10, effective_against: Ghost)))"#,
        )
        .unwrap();
        fs::write(items.join("broken.ron"), "(name: ").unwrap();
        fs::write(
            enemies.join("ghoul.ron"),
            r#"(name: "Ghoul", max_health: 50, base_damage: 10, category: Zombie)"#,
        )
        .unwrap();

        let catalog = load_catalog_from(&items, &enemies);

        assert_eq!(catalog.item_count(), 1);
        let knife = catalog.weapon("knife").unwrap();
        assert_eq!(knife.effectiveness_multiplier, 2.0);
        let ghoul = catalog.enemy("ghoul").unwrap();
        assert_eq!(ghoul.id, "ghoul");
        assert_eq!(ghoul.category, EnemyCategory::Zombie);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_shipped_definitions_load_and_validate() {
        let catalog = load_catalog_from(Path::new(ITEMS_DIR), Path::new(ENEMIES_DIR));

        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.weapon("pistol").unwrap().ammo_type.as_deref(), Some("bullets"));
        assert_eq!(catalog.item("rusty_key").unwrap().category, ItemCategory::Key);
        assert_eq!(catalog.item("bullets").unwrap().max_stack, 30);
        assert_eq!(catalog.enemy("wraith").unwrap().category, EnemyCategory::Ghost);
    }

    #[test]
    fn test_zero_health_enemy_is_skipped() {
        let root = scratch_dir("zero-health");
        let items = root.join("items");
        let enemies = root.join("enemies");
        fs::create_dir_all(&items).unwrap();
        fs::create_dir_all(&enemies).unwrap();

        fs::write(
            enemies.join("husk.ron"),
            r#"(name: "Husk", max_health: 0, base_damage: 5)"#,
        )
        .unwrap();
        fs::write(
            items.join("twig.ron"),
            r#"(name: "Twig", weapon: Some((base_damage: 0)))"#,
        )
        .unwrap();

        assert!(matches!(
            load_enemy_file(&enemies.join("husk.ron")),
            Err(DataLoadError::InvalidValue { .. })
        ));
        assert!(matches!(
            load_item_file(&items.join("twig.ron")),
            Err(DataLoadError::InvalidValue { .. })
        ));

        let catalog = load_catalog_from(&items, &enemies);
        assert!(catalog.enemy("husk").is_none());
        assert!(catalog.item("twig").is_none());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_validate_rejects_zero_damage_enemy() {
        let mut catalog = Catalog::default();
        catalog.insert_enemy(EnemyDescriptor {
            id: "shade".to_string(),
            name: "Shade".to_string(),
            max_health: 20,
            base_damage: 0,
            category: EnemyCategory::Ghost,
        });

        assert!(matches!(
            catalog.validate(),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_item_file(Path::new("definitely/not/here.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
