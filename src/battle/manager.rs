//! Battle state machine - encounter lifecycle and turn resolution.
//!
//! A turn runs as a fixed sequence of steps separated by a configurable
//! beat. The manager keeps the step it is waiting on in its phase and a
//! single `Countdown`; every `tick` advances the countdown and performs at
//! most one step when it runs out.

use bevy::prelude::*;
use std::time::Duration;

use crate::core::{BattleOutcome, Combatant, Countdown, HealthBarUpdate};
use crate::items::{EnemyDescriptor, ItemDescriptor, WeaponStats};
use crate::player::{ControlLockId, ControlLocks, PlayerStats};

/// Name shown on the player's health bar.
pub const PLAYER_DISPLAY_NAME: &str = "Player";

/// The step a resolving turn performs once the current beat runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    PlayerStrike,
    EnemyCounter,
    Victory,
    Defeat,
    ReturnToMenu,
}

/// Where the battle state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattlePhase {
    #[default]
    Idle,
    /// Waiting for the player to pick an action.
    MenuOpen,
    /// A turn is playing out; menus stay closed until it finishes.
    Resolving(TurnStep),
}

/// Something that happened inside the state machine, for other systems to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleSignal {
    Started { enemy_id: String },
    MenuOpened,
    MenuHidden,
    EnemyHit,
    PlayerDamaged,
    HealthBar(HealthBarUpdate),
    Ended(BattleOutcome),
}

/// Transient state of the active encounter.
#[derive(Debug, Clone)]
pub struct EncounterState {
    pub enemy: EnemyDescriptor,
    pub enemy_health: u32,
    /// Weapon chosen for the turn currently resolving.
    pending_weapon: Option<(String, WeaponStats)>,
}

/// Owns the one encounter that can be active at a time.
#[derive(Resource, Debug, Default)]
pub struct BattleManager {
    phase: BattlePhase,
    encounter: Option<EncounterState>,
    beat: Countdown,
    turn_delay: f32,
    arena_active: bool,
    signals: Vec<BattleSignal>,
}

impl BattleManager {
    pub fn new(turn_delay: f32) -> Self {
        Self {
            turn_delay,
            ..default()
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_in_battle(&self) -> bool {
        self.phase != BattlePhase::Idle
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, BattlePhase::Resolving(_))
    }

    pub fn is_arena_active(&self) -> bool {
        self.arena_active
    }

    pub fn encounter(&self) -> Option<&EncounterState> {
        self.encounter.as_ref()
    }

    pub fn enemy_health(&self) -> Option<u32> {
        self.encounter.as_ref().map(|e| e.enemy_health)
    }

    /// Take every signal produced since the last drain.
    pub fn drain_signals(&mut self) -> Vec<BattleSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Begin an encounter with `enemy`.
    ///
    /// Does nothing (besides logging) when a battle is already running.
    pub fn start_battle(
        &mut self,
        enemy: &EnemyDescriptor,
        player: &PlayerStats,
        locks: &mut ControlLocks,
    ) -> bool {
        if self.is_in_battle() {
            warn!("Battle already in progress, ignoring {}", enemy.name);
            return false;
        }

        self.encounter = Some(EncounterState {
            enemy: enemy.clone(),
            enemy_health: enemy.max_health,
            pending_weapon: None,
        });
        self.arena_active = true;
        locks.lock(ControlLockId::Battle);

        self.signals.push(BattleSignal::Started {
            enemy_id: enemy.id.clone(),
        });
        self.push_enemy_health();
        self.push_player_health(player);
        self.open_menu();

        info!("Battle started against {}", enemy.name);
        true
    }

    /// Tear the encounter down. Every way out of a battle ends up here.
    pub fn end_battle(&mut self, outcome: BattleOutcome, locks: &mut ControlLocks) -> bool {
        if !self.is_in_battle() {
            debug!("end_battle called with no active battle");
            return false;
        }

        self.arena_active = false;
        locks.unlock(ControlLockId::Battle);
        self.encounter = None;
        self.beat.cancel();
        self.phase = BattlePhase::Idle;
        self.signals.push(BattleSignal::Ended(outcome));

        info!("Battle ended: {:?}", outcome);
        true
    }

    /// Queue the player's attack with `weapon`.
    ///
    /// Only accepted while the menu is open; a second submission during a
    /// resolving turn is dropped.
    pub fn submit_player_action(&mut self, weapon: &ItemDescriptor) -> bool {
        if self.phase != BattlePhase::MenuOpen {
            warn!("Player action {} rejected in phase {:?}", weapon.name, self.phase);
            return false;
        }
        let Some(stats) = weapon.as_weapon() else {
            warn!("{} is not a weapon", weapon.name);
            return false;
        };
        let Some(encounter) = self.encounter.as_mut() else {
            warn!("Menu open without an encounter, ignoring action");
            return false;
        };

        encounter.pending_weapon = Some((weapon.name.clone(), stats.clone()));
        self.signals.push(BattleSignal::MenuHidden);
        self.wait_then(TurnStep::PlayerStrike);
        true
    }

    /// Advance the resolving turn by `delta`.
    pub fn tick(&mut self, delta: Duration, player: &mut PlayerStats, locks: &mut ControlLocks) {
        let BattlePhase::Resolving(step) = self.phase else {
            return;
        };
        if !self.beat.tick(delta) {
            return;
        }

        match step {
            TurnStep::PlayerStrike => self.resolve_player_strike(),
            TurnStep::EnemyCounter => self.resolve_enemy_counter(player),
            TurnStep::Victory => {
                self.end_battle(BattleOutcome::Victory, locks);
            }
            TurnStep::Defeat => {
                self.end_battle(BattleOutcome::Defeat, locks);
            }
            TurnStep::ReturnToMenu => self.open_menu(),
        }
    }

    fn resolve_player_strike(&mut self) {
        let Some(encounter) = self.encounter.as_mut() else {
            return;
        };
        let Some((weapon_name, stats)) = encounter.pending_weapon.take() else {
            warn!("Turn resolving without a weapon, returning to menu");
            self.open_menu();
            return;
        };

        let damage = stats.effective_damage(encounter.enemy.category);
        encounter.enemy_health = encounter.enemy_health.saturating_sub(damage);
        info!(
            "{} hits {} for {} ({} left)",
            weapon_name, encounter.enemy.name, damage, encounter.enemy_health
        );
        let defeated = encounter.enemy_health == 0;

        self.signals.push(BattleSignal::EnemyHit);
        self.push_enemy_health();

        if defeated {
            self.wait_then(TurnStep::Victory);
        } else {
            self.wait_then(TurnStep::EnemyCounter);
        }
    }

    fn resolve_enemy_counter(&mut self, player: &mut PlayerStats) {
        let Some(encounter) = self.encounter.as_ref() else {
            return;
        };

        let taken = player.take_damage(encounter.enemy.base_damage);
        info!(
            "{} hits the player for {} ({} left)",
            encounter.enemy.name,
            taken,
            player.current_health()
        );

        self.signals.push(BattleSignal::PlayerDamaged);
        self.push_player_health(player);

        if player.is_alive() {
            self.wait_then(TurnStep::ReturnToMenu);
        } else {
            self.wait_then(TurnStep::Defeat);
        }
    }

    fn wait_then(&mut self, step: TurnStep) {
        self.phase = BattlePhase::Resolving(step);
        self.beat.start(self.turn_delay);
    }

    fn open_menu(&mut self) {
        self.phase = BattlePhase::MenuOpen;
        self.signals.push(BattleSignal::MenuOpened);
    }

    fn push_enemy_health(&mut self) {
        let Some(encounter) = self.encounter.as_ref() else {
            return;
        };
        self.signals.push(BattleSignal::HealthBar(HealthBarUpdate {
            side: Combatant::Enemy,
            name: encounter.enemy.name.clone(),
            current: encounter.enemy_health,
            max: encounter.enemy.max_health,
        }));
    }

    fn push_player_health(&mut self, player: &PlayerStats) {
        self.signals.push(BattleSignal::HealthBar(HealthBarUpdate {
            side: Combatant::Player,
            name: PLAYER_DISPLAY_NAME.to_string(),
            current: player.current_health(),
            max: player.max_health(),
        }));
    }
}
