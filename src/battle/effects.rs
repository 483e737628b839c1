//! Battle feedback effects - enemy hit flash and squeeze, player damage flash and shake.

use bevy::prelude::*;

use super::config::BattleConfig;
use crate::core::{Countdown, EnemyHitEvent, PlayerDamagedEvent};

/// Flash and squash the enemy sprite when it gets hit.
#[derive(Resource, Debug, Default)]
pub struct EnemyHitEffects {
    flash: Countdown,
    squeeze: Countdown,
    flash_intensity: f32,
    squeeze_scale: Vec2,
}

impl EnemyHitEffects {
    /// Restart both effects from the beginning.
    pub fn trigger(&mut self, config: &BattleConfig) {
        self.flash_intensity = config.hit_flash_intensity;
        self.squeeze_scale = Vec2::new(config.squeeze_scale.0, config.squeeze_scale.1);
        self.flash.start(config.hit_flash_duration);
        self.squeeze.start(config.squeeze_duration);
    }

    pub fn update(&mut self, delta: std::time::Duration) {
        self.flash.tick(delta);
        self.squeeze.tick(delta);
    }

    /// Current flash strength, fading linearly from full intensity to 0.
    pub fn flash_value(&self) -> f32 {
        if !self.flash.is_running() {
            return 0.0;
        }
        self.flash_intensity * (1.0 - self.flash.fraction())
    }

    /// Current scale factor: squeezes out over the first half, back over the second.
    pub fn squeeze_factor(&self) -> Vec2 {
        if !self.squeeze.is_running() {
            return Vec2::ONE;
        }
        let progress = self.squeeze.fraction();
        if progress < 0.5 {
            Vec2::ONE.lerp(self.squeeze_scale, progress * 2.0)
        } else {
            self.squeeze_scale.lerp(Vec2::ONE, (progress - 0.5) * 2.0)
        }
    }
}

/// Screen shake effect, offsets in UI pixels.
#[derive(Debug, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    timer: Countdown,
}

impl ScreenShake {
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.timer.start(duration);
    }

    pub fn update(&mut self, delta: std::time::Duration) -> Vec2 {
        self.timer.tick(delta);
        if !self.timer.is_running() {
            return Vec2::ZERO;
        }

        let current_intensity = self.intensity * (1.0 - self.timer.fraction());

        // Random offset
        let x = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;
        let y = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;

        Vec2::new(x, y)
    }
}

/// Red flash (and optional shake) when the player gets hit.
#[derive(Resource, Debug, Default)]
pub struct PlayerDamageEffects {
    flash: Countdown,
    flash_alpha: f32,
    pub shake: ScreenShake,
    /// Latest shake offset, applied by the UI.
    pub shake_offset: Vec2,
}

impl PlayerDamageEffects {
    pub fn trigger(&mut self, config: &BattleConfig) {
        self.flash_alpha = config.damage_flash_alpha;
        self.flash.start(config.damage_flash_duration);
        if config.camera_shake_enabled {
            self.shake.shake(config.shake_intensity, config.shake_duration);
        }
    }

    pub fn update(&mut self, delta: std::time::Duration) {
        self.flash.tick(delta);
        self.shake_offset = self.shake.update(delta);
    }

    /// Overlay alpha, fading linearly from the configured alpha to 0.
    pub fn flash_alpha(&self) -> f32 {
        if !self.flash.is_running() {
            return 0.0;
        }
        self.flash_alpha * (1.0 - self.flash.fraction())
    }
}

/// Start effects for this frame's hits.
pub fn trigger_battle_effects(
    config: Res<BattleConfig>,
    mut enemy_hits: EventReader<EnemyHitEvent>,
    mut player_hits: EventReader<PlayerDamagedEvent>,
    mut enemy_effects: ResMut<EnemyHitEffects>,
    mut player_effects: ResMut<PlayerDamageEffects>,
) {
    if enemy_hits.read().count() > 0 {
        enemy_effects.trigger(&config);
    }
    if player_hits.read().count() > 0 {
        player_effects.trigger(&config);
    }
}

/// Advance running effects.
pub fn update_battle_effects(
    time: Res<Time>,
    mut enemy_effects: ResMut<EnemyHitEffects>,
    mut player_effects: ResMut<PlayerDamageEffects>,
) {
    enemy_effects.update(time.delta());
    player_effects.update(time.delta());
}
