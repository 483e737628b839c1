//! Battle systems - start requests, menu input, turn pacing and signal fan-out.

use bevy::prelude::*;

use super::config::BattleConfig;
use super::manager::{BattleManager, BattleSignal};
use super::menu::{BattleMenu, MenuInput, MenuOutcome};
use super::recent::RecentWeapons;
use crate::core::{
    BattleEndedEvent, BattleOutcome, BattleStartedEvent, EnemyHitEvent, HealthBarUpdate,
    PlayerDamagedEvent, PlayerMessage, StartBattleRequest,
};
use crate::inventory::{Inventory, MESSAGE_DISPLAY_DURATION};
use crate::items::Catalog;
use crate::player::{ControlLocks, PlayerStats};

/// System set ordering for battles.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BattleSet {
    Input,
    Resolve,
    Feedback,
}

/// Build the battle manager from the loaded config.
pub fn setup_battle_manager(mut commands: Commands, config: Res<BattleConfig>) {
    commands.insert_resource(BattleManager::new(config.turn_delay));
}

/// Start battles requested by world triggers.
pub fn handle_start_requests(
    mut requests: EventReader<StartBattleRequest>,
    catalog: Res<Catalog>,
    mut manager: ResMut<BattleManager>,
    player: Option<Res<PlayerStats>>,
    locks: Option<ResMut<ControlLocks>>,
) {
    let (Some(player), Some(mut locks)) = (player, locks) else {
        if !requests.is_empty() {
            warn!("Battle requested but player stats or control locks are missing");
            requests.clear();
        }
        return;
    };

    for request in requests.read() {
        let Some(enemy) = catalog.enemy(&request.enemy_id) else {
            warn!("Battle requested against unknown enemy '{}'", request.enemy_id);
            continue;
        };
        manager.start_battle(enemy, &player, &mut locks);
    }
}

/// Feed menu input to the navigator and act on what it decides.
#[allow(clippy::too_many_arguments)]
pub fn handle_menu_input(
    mut inputs: EventReader<MenuInput>,
    mut menu: ResMut<BattleMenu>,
    catalog: Res<Catalog>,
    mut inventory: ResMut<Inventory>,
    mut recent: ResMut<RecentWeapons>,
    mut manager: ResMut<BattleManager>,
    mut locks: ResMut<ControlLocks>,
    mut messages: EventWriter<PlayerMessage>,
) {
    for input in inputs.read() {
        if manager.is_resolving() || !menu.is_open() {
            continue;
        }

        // Navigation alone must not flag the ledger or the weapon history as changed.
        let outcome = menu.handle_input(
            *input,
            &catalog,
            inventory.bypass_change_detection(),
            recent.bypass_change_detection(),
        );
        if matches!(outcome, MenuOutcome::Attack(_)) {
            inventory.set_changed();
            recent.set_changed();
        }

        match outcome {
            MenuOutcome::None => {}
            MenuOutcome::EndBattle => {
                manager.end_battle(BattleOutcome::Fled, &mut locks);
            }
            MenuOutcome::Attack(weapon_id) => {
                let Some(weapon) = catalog.item(&weapon_id) else {
                    warn!("Confirmed weapon '{}' vanished from the catalog", weapon_id);
                    continue;
                };
                info!("Player attacks with {}", weapon.name);
                manager.submit_player_action(weapon);
            }
            MenuOutcome::Blocked(_) => {
                messages.send(PlayerMessage::new(
                    "No ammo left for this weapon!",
                    MESSAGE_DISPLAY_DURATION,
                ));
            }
        }
    }
}

/// Advance the resolving turn.
pub fn advance_battle(
    time: Res<Time>,
    mut manager: ResMut<BattleManager>,
    mut player: ResMut<PlayerStats>,
    mut locks: ResMut<ControlLocks>,
) {
    if !manager.is_resolving() {
        return;
    }
    manager.tick(time.delta(), &mut player, &mut locks);
}

/// Fan battle signals out to the menu and to global events.
#[allow(clippy::too_many_arguments)]
pub fn forward_battle_signals(
    mut manager: ResMut<BattleManager>,
    mut menu: ResMut<BattleMenu>,
    mut started: EventWriter<BattleStartedEvent>,
    mut ended: EventWriter<BattleEndedEvent>,
    mut health_bars: EventWriter<HealthBarUpdate>,
    mut enemy_hits: EventWriter<EnemyHitEvent>,
    mut player_hits: EventWriter<PlayerDamagedEvent>,
) {
    for signal in manager.drain_signals() {
        match signal {
            BattleSignal::Started { enemy_id } => {
                started.send(BattleStartedEvent { enemy_id });
            }
            BattleSignal::MenuOpened => menu.open_main_menu(),
            BattleSignal::MenuHidden => menu.close(),
            BattleSignal::EnemyHit => {
                enemy_hits.send(EnemyHitEvent);
            }
            BattleSignal::PlayerDamaged => {
                player_hits.send(PlayerDamagedEvent);
            }
            BattleSignal::HealthBar(update) => {
                health_bars.send(update);
            }
            BattleSignal::Ended(outcome) => {
                menu.close();
                ended.send(BattleEndedEvent { outcome });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CorePlugin;
    use crate::items::{EnemyCategory, EnemyDescriptor, ItemCategory, ItemDescriptor, WeaponStats};
    use crate::battle::recent::{persist_recent_weapons, RecentWeaponsStore};
    use crate::player::ControlLockId;

    #[derive(Resource, Default)]
    struct Outcomes(Vec<BattleOutcome>);

    fn record_outcomes(mut events: EventReader<BattleEndedEvent>, mut log: ResMut<Outcomes>) {
        log.0.extend(events.read().map(|e| e.outcome));
    }

    fn ghoul_catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.insert_enemy(EnemyDescriptor {
            id: "ghoul".to_string(),
            name: "Ghoul".to_string(),
            max_health: 50,
            base_damage: 10,
            category: EnemyCategory::Zombie,
        });
        catalog.insert_item(ItemDescriptor::weapon(
            "cleaver",
            "Cleaver",
            WeaponStats {
                base_damage: 30,
                effective_against: EnemyCategory::Zombie,
                effectiveness_multiplier: 2.0,
                ammo_type: None,
            },
        ));
        catalog.insert_item(ItemDescriptor::weapon(
            "flare_gun",
            "Flare Gun",
            WeaponStats {
                base_damage: 40,
                effective_against: EnemyCategory::None,
                effectiveness_multiplier: 1.0,
                ammo_type: Some("flares".to_string()),
            },
        ));
        catalog.insert_item(ItemDescriptor::item("flares", "Flares", ItemCategory::Consumable, 5));
        catalog
    }

    fn battle_app() -> App {
        let catalog = ghoul_catalog();
        let mut inventory = Inventory::default();
        inventory.add_item(catalog.item("cleaver").unwrap(), 1);
        inventory.add_item(catalog.item("flare_gun").unwrap(), 1);

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, CorePlugin))
            .add_event::<MenuInput>()
            .insert_resource(catalog)
            .insert_resource(inventory)
            .insert_resource(BattleConfig {
                turn_delay: 0.0,
                ..default()
            })
            .insert_resource(BattleManager::new(0.0))
            .init_resource::<BattleMenu>()
            .init_resource::<RecentWeapons>()
            .init_resource::<PlayerStats>()
            .init_resource::<ControlLocks>()
            .init_resource::<Outcomes>()
            .add_systems(
                Update,
                (
                    handle_start_requests,
                    handle_menu_input,
                    advance_battle,
                    forward_battle_signals,
                    record_outcomes,
                )
                    .chain(),
            );
        app
    }

    fn start_ghoul_battle(app: &mut App) {
        app.world_mut().send_event(StartBattleRequest {
            enemy_id: "ghoul".to_string(),
        });
        app.update();
    }

    fn press(app: &mut App, inputs: &[MenuInput]) {
        for input in inputs {
            app.world_mut().send_event(*input);
            app.update();
        }
    }

    #[test]
    fn test_start_request_opens_menu_and_locks_control() {
        let mut app = battle_app();
        start_ghoul_battle(&mut app);

        assert!(app.world().resource::<BattleManager>().is_in_battle());
        assert!(app.world().resource::<BattleMenu>().is_open());
        assert!(app
            .world()
            .resource::<ControlLocks>()
            .is_locked_by(ControlLockId::Battle));
    }

    #[test]
    fn test_unknown_enemy_is_ignored() {
        let mut app = battle_app();
        app.world_mut().send_event(StartBattleRequest {
            enemy_id: "dragon".to_string(),
        });
        app.update();

        assert!(!app.world().resource::<BattleManager>().is_in_battle());
        assert!(!app.world().resource::<ControlLocks>().is_locked());
    }

    #[test]
    fn test_effective_attack_wins_without_counter() {
        let mut app = battle_app();
        start_ghoul_battle(&mut app);

        // Attack -> Used tab (empty) -> Basic tab -> confirm Cleaver
        press(&mut app, &[MenuInput::Confirm, MenuInput::Right, MenuInput::Confirm]);
        app.update();

        assert!(!app.world().resource::<BattleManager>().is_in_battle());
        assert_eq!(app.world().resource::<PlayerStats>().current_health(), 100);
        assert_eq!(app.world().resource::<Outcomes>().0, vec![BattleOutcome::Victory]);
        assert!(!app.world().resource::<ControlLocks>().is_locked());
        assert_eq!(app.world().resource::<RecentWeapons>().ids(), ["cleaver"]);
        assert!(!app.world().resource::<BattleMenu>().is_open());
    }

    #[test]
    fn test_run_ends_battle() {
        let mut app = battle_app();
        start_ghoul_battle(&mut app);

        press(&mut app, &[MenuInput::Up, MenuInput::Confirm]);

        assert!(!app.world().resource::<BattleManager>().is_in_battle());
        assert_eq!(app.world().resource::<Outcomes>().0, vec![BattleOutcome::Fled]);
        assert!(!app.world().resource::<ControlLocks>().is_locked());
    }

    #[test]
    fn test_weapon_without_ammo_keeps_menu_open() {
        let mut app = battle_app();
        start_ghoul_battle(&mut app);

        // Attack -> Used -> Limited (wrap left) -> confirm Flare Gun with no flares
        press(&mut app, &[MenuInput::Confirm, MenuInput::Left, MenuInput::Confirm]);

        let manager = app.world().resource::<BattleManager>();
        assert!(manager.is_in_battle());
        assert!(!manager.is_resolving());
        assert_eq!(manager.enemy_health(), Some(50));
        assert!(app.world().resource::<RecentWeapons>().ids().is_empty());
        assert_eq!(app.world().resource::<Events<PlayerMessage>>().len(), 1);
    }

    #[test]
    fn test_request_without_player_stats_is_dropped() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, CorePlugin))
            .insert_resource(ghoul_catalog())
            .insert_resource(BattleManager::new(0.0))
            .init_resource::<ControlLocks>()
            .add_systems(Update, handle_start_requests);

        start_ghoul_battle(&mut app);

        assert!(!app.world().resource::<BattleManager>().is_in_battle());
        assert!(!app.world().resource::<ControlLocks>().is_locked());

        // The dropped request must not start a battle once the stats show up.
        app.init_resource::<PlayerStats>();
        app.update();
        app.update();

        assert!(!app.world().resource::<BattleManager>().is_in_battle());
        assert!(!app.world().resource::<ControlLocks>().is_locked());
    }

    #[test]
    fn test_weapon_history_saved_only_after_attack() {
        let path = std::env::temp_dir().join(format!(
            "grimward-history-{}/recent_weapons.ron",
            std::process::id()
        ));
        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let mut app = battle_app();
        app.insert_resource(RecentWeaponsStore { path: path.clone() })
            .add_systems(Update, persist_recent_weapons.after(record_outcomes));
        start_ghoul_battle(&mut app);

        // Attack -> Used -> Basic -> Used -> Basic
        press(
            &mut app,
            &[MenuInput::Confirm, MenuInput::Right, MenuInput::Left, MenuInput::Right],
        );
        assert!(!path.exists());

        press(&mut app, &[MenuInput::Confirm]);
        app.update();

        assert!(path.exists());
        let saved = RecentWeapons::load(&path).unwrap();
        assert_eq!(saved.ids(), ["cleaver"]);

        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }
}
