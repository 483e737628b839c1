//! Battle pacing and feedback configuration loaded from an external RON file.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

/// Battle configuration loaded from assets/data/battle/battle_config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Pause between the steps of a turn, in seconds.
    pub turn_delay: f32,
    // Enemy hit feedback
    pub hit_flash_duration: f32,
    pub hit_flash_intensity: f32,
    pub squeeze_duration: f32,
    pub squeeze_scale: (f32, f32),
    // Player damage feedback
    pub damage_flash_duration: f32,
    pub damage_flash_alpha: f32,
    pub camera_shake_enabled: bool,
    pub shake_intensity: f32,
    pub shake_duration: f32,
    /// Where the recently used weapon list is saved.
    pub recent_weapons_path: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            turn_delay: 1.0,
            hit_flash_duration: 0.3,
            hit_flash_intensity: 1.0,
            squeeze_duration: 0.2,
            squeeze_scale: (0.7, 1.3),
            damage_flash_duration: 0.3,
            damage_flash_alpha: 0.5,
            camera_shake_enabled: false,
            shake_intensity: 8.0,
            shake_duration: 0.25,
            recent_weapons_path: "saves/recent_weapons.ron".to_string(),
        }
    }
}

impl BattleConfig {
    /// Load battle config from RON file.
    pub fn load() -> Self {
        let path = "assets/data/battle/battle_config.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded battle config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

/// System to load battle config at startup.
pub fn load_battle_config(mut commands: Commands) {
    let config = BattleConfig::load();
    commands.insert_resource(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_config_matches_defaults() {
        let contents = fs::read_to_string("assets/data/battle/battle_config.ron").unwrap();
        let config: BattleConfig = ron::from_str(&contents).unwrap();
        assert_eq!(config.turn_delay, 1.0);
        assert!(!config.camera_shake_enabled);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: BattleConfig = ron::from_str("(turn_delay: 0.5, camera_shake_enabled: true)").unwrap();
        assert_eq!(config.turn_delay, 0.5);
        assert!(config.camera_shake_enabled);
        assert_eq!(config.hit_flash_duration, 0.3);
        assert_eq!(config.squeeze_scale, (0.7, 1.3));
    }
}
