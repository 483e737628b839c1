//! Player-related components and resources.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Player's health, shared between exploration and battles.
#[derive(Resource, Debug, Clone)]
pub struct PlayerStats {
    max_health: u32,
    current_health: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PlayerStats {
    pub fn new(max_health: u32) -> Self {
        Self {
            max_health,
            current_health: max_health,
        }
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    /// Apply damage, clamping at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current_health);
        self.current_health -= actual;
        actual
    }

    /// Restore health, clamping at the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max_health - self.current_health);
        self.current_health += actual;
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn reset_health(&mut self) {
        self.current_health = self.max_health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut stats = PlayerStats::new(10);
        assert_eq!(stats.take_damage(15), 10);
        assert_eq!(stats.current_health(), 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut stats = PlayerStats::new(100);
        stats.take_damage(30);
        assert_eq!(stats.heal(50), 30);
        assert_eq!(stats.current_health(), 100);

        stats.take_damage(100);
        stats.reset_health();
        assert_eq!(stats.current_health(), 100);
    }
}
