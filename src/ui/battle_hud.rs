//! Battle HUD - health bars, enemy portrait, battle menu and damage overlay.

use bevy::prelude::*;

use crate::battle::{
    BattleManager, BattleMenu, EnemyHitEffects, MainMenuOption, MenuScreen, PlayerDamageEffects, WeaponTab,
};
use crate::core::{Combatant, HealthBarUpdate};

/// Rows in the weapon list.
pub const WEAPON_SLOT_COUNT: usize = 9;

const PORTRAIT_SIZE: Vec2 = Vec2::new(160.0, 220.0);
const PORTRAIT_COLOR: [f32; 3] = [0.35, 0.3, 0.32];
const PANEL_COLOR: Color = Color::srgba(0.05, 0.05, 0.07, 0.9);
const TEXT_COLOR: Color = Color::srgb(0.8, 0.8, 0.85);
const SELECTED_COLOR: Color = Color::srgb(0.95, 0.8, 0.3);
const EMPTY_LIST_TEXT: &str = "No weapons available";

/// Root of the battle screen, hidden outside battles.
#[derive(Component)]
pub struct BattleHudRoot;

/// The enemy picture that flashes and squeezes on hit.
#[derive(Component)]
pub struct EnemyPortrait;

/// Full-screen red overlay for player damage.
#[derive(Component)]
pub struct DamageFlashOverlay;

/// Fill node of a health bar.
#[derive(Component)]
pub struct HealthBarFill(pub Combatant);

/// Text next to a health bar.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum HealthBarText {
    Name(Combatant),
    Value(Combatant),
}

/// Menu nodes whose visibility follows the menu state.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum MenuWidget {
    MainPanel,
    AttackPanel,
    EmptyLabel,
    WeaponRow(usize),
}

/// Menu text whose content or highlight follows the menu state.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum MenuText {
    MainOption(MainMenuOption),
    Tab(WeaponTab),
    WeaponName(usize),
    WeaponAmount(usize),
}

fn text_bundle(text: &str, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(TEXT_COLOR),
    )
}

fn portrait_color(flash: f32) -> Color {
    let flash = flash.clamp(0.0, 1.0);
    let [r, g, b] = PORTRAIT_COLOR.map(|c| c + (1.0 - c) * flash);
    Color::srgb(r, g, b)
}

/// Spawn the battle screen, hidden.
pub fn spawn_battle_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.02, 0.02, 0.03)),
            Visibility::Hidden,
            BattleHudRoot,
        ))
        .with_children(|root| {
            // Enemy bar and portrait
            root.spawn(Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|top| {
                spawn_health_bar(top, Combatant::Enemy, Color::srgb(0.7, 0.15, 0.15));
                top.spawn((
                    Node {
                        width: Val::Px(PORTRAIT_SIZE.x),
                        height: Val::Px(PORTRAIT_SIZE.y),
                        margin: UiRect::top(Val::Px(20.0)),
                        ..default()
                    },
                    BackgroundColor(portrait_color(0.0)),
                    EnemyPortrait,
                ));
            });

            // Player bar and menus
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::End,
                column_gap: Val::Px(20.0),
                ..default()
            })
            .with_children(|bottom| {
                spawn_health_bar(bottom, Combatant::Player, Color::srgb(0.2, 0.6, 0.3));
                spawn_main_menu(bottom);
                spawn_attack_menu(bottom);
            });
        });

    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.8, 0.0, 0.0, 0.0)),
        DamageFlashOverlay,
    ));
}

fn spawn_health_bar(parent: &mut ChildBuilder, side: Combatant, color: Color) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((text_bundle("", 16.0), HealthBarText::Name(side)));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        HealthBarFill(side),
                    ));
                });

            bar_parent.spawn((text_bundle("", 14.0), HealthBarText::Value(side)));
        });
}

fn spawn_main_menu(parent: &mut ChildBuilder) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Visibility::Hidden,
            MenuWidget::MainPanel,
        ))
        .with_children(|panel| {
            for option in MainMenuOption::ALL {
                panel.spawn((text_bundle(option.label(), 22.0), MenuText::MainOption(option)));
            }
        });
}

fn spawn_attack_menu(parent: &mut ChildBuilder) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(4.0),
                min_width: Val::Px(260.0),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Visibility::Hidden,
            MenuWidget::AttackPanel,
        ))
        .with_children(|panel| {
            // Tab strip
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(16.0),
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                })
                .with_children(|tabs| {
                    for tab in WeaponTab::ALL {
                        tabs.spawn((text_bundle(tab.label(), 18.0), MenuText::Tab(tab)));
                    }
                });

            for index in 0..WEAPON_SLOT_COUNT {
                panel
                    .spawn((
                        Node {
                            flex_direction: FlexDirection::Row,
                            justify_content: JustifyContent::SpaceBetween,
                            ..default()
                        },
                        Visibility::Hidden,
                        MenuWidget::WeaponRow(index),
                    ))
                    .with_children(|row| {
                        row.spawn((text_bundle("", 18.0), MenuText::WeaponName(index)));
                        row.spawn((text_bundle("", 18.0), MenuText::WeaponAmount(index)));
                    });
            }

            panel.spawn((
                text_bundle(EMPTY_LIST_TEXT, 18.0),
                Visibility::Hidden,
                MenuWidget::EmptyLabel,
            ));
        });
}

/// Show the battle screen while a battle runs.
pub fn toggle_battle_hud(
    manager: Res<BattleManager>,
    mut roots: Query<&mut Visibility, With<BattleHudRoot>>,
) {
    let target = if manager.is_in_battle() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    for mut visibility in roots.iter_mut() {
        visibility.set_if_neq(target);
    }
}

/// Apply health bar updates to the bar fill and its text.
pub fn update_health_bars(
    mut updates: EventReader<HealthBarUpdate>,
    mut fills: Query<(&HealthBarFill, &mut Node)>,
    mut texts: Query<(&HealthBarText, &mut Text)>,
) {
    for update in updates.read() {
        for (fill, mut node) in fills.iter_mut() {
            if fill.0 == update.side {
                node.width = Val::Percent(update.fraction() * 100.0);
            }
        }

        for (part, mut text) in texts.iter_mut() {
            match *part {
                HealthBarText::Name(side) if side == update.side => text.0 = update.name.clone(),
                HealthBarText::Value(side) if side == update.side => text.0 = update.label(),
                _ => {}
            }
        }
    }
}

/// Mirror the menu cursor state onto the menu nodes.
pub fn sync_battle_menu(
    menu: Res<BattleMenu>,
    mut widgets: Query<(&MenuWidget, &mut Visibility)>,
    mut texts: Query<(&MenuText, &mut Text, &mut TextColor)>,
) {
    if !menu.is_changed() {
        return;
    }

    let entries = menu.entries();
    // Scroll so the selected row stays inside the visible slots.
    let offset = menu
        .selected_weapon_index()
        .map_or(0, |i| i.saturating_sub(WEAPON_SLOT_COUNT - 1));
    let on_attack = menu.screen() == MenuScreen::Attack;

    let shown = |visible: bool| {
        if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        }
    };

    for (widget, mut visibility) in widgets.iter_mut() {
        *visibility = shown(match *widget {
            MenuWidget::MainPanel => menu.screen() == MenuScreen::Main,
            MenuWidget::AttackPanel => on_attack,
            MenuWidget::EmptyLabel => menu.is_empty_state(),
            MenuWidget::WeaponRow(index) => on_attack && offset + index < entries.len(),
        });
    }

    let highlight = |selected: bool| {
        if selected {
            SELECTED_COLOR
        } else {
            TEXT_COLOR
        }
    };

    for (kind, mut text, mut color) in texts.iter_mut() {
        match *kind {
            MenuText::MainOption(option) => {
                color.0 = highlight(option == menu.selected_option());
            }
            MenuText::Tab(tab) => {
                color.0 = highlight(tab == menu.current_tab());
            }
            MenuText::WeaponName(index) => {
                let row = offset + index;
                text.0 = entries.get(row).map(|e| e.name.clone()).unwrap_or_default();
                color.0 = highlight(menu.selected_weapon_index() == Some(row));
            }
            MenuText::WeaponAmount(index) => {
                let row = offset + index;
                text.0 = entries.get(row).map(|e| e.amount_label()).unwrap_or_default();
                color.0 = highlight(menu.selected_weapon_index() == Some(row));
            }
        }
    }
}

/// Drive the portrait and overlay from the running effects.
pub fn apply_battle_effects(
    enemy_effects: Res<EnemyHitEffects>,
    player_effects: Res<PlayerDamageEffects>,
    mut portraits: Query<
        (&mut Node, &mut BackgroundColor),
        (With<EnemyPortrait>, Without<DamageFlashOverlay>, Without<BattleHudRoot>),
    >,
    mut overlays: Query<&mut BackgroundColor, (With<DamageFlashOverlay>, Without<EnemyPortrait>)>,
    mut roots: Query<&mut Node, (With<BattleHudRoot>, Without<EnemyPortrait>)>,
) {
    let squeeze = enemy_effects.squeeze_factor();
    for (mut node, mut color) in portraits.iter_mut() {
        node.width = Val::Px(PORTRAIT_SIZE.x * squeeze.x);
        node.height = Val::Px(PORTRAIT_SIZE.y * squeeze.y);
        color.0 = portrait_color(enemy_effects.flash_value());
    }

    for mut color in overlays.iter_mut() {
        color.0 = Color::srgba(0.8, 0.0, 0.0, player_effects.flash_alpha());
    }

    let shake = player_effects.shake_offset;
    for mut node in roots.iter_mut() {
        node.left = Val::Px(shake.x);
        node.top = Val::Px(shake.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{MenuInput, RecentWeapons};
    use crate::core::{BattleOutcome, CorePlugin};
    use crate::inventory::Inventory;
    use crate::items::{Catalog, EnemyCategory, EnemyDescriptor, ItemDescriptor, WeaponStats};
    use crate::player::{ControlLocks, PlayerStats};

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, CorePlugin))
            .init_resource::<BattleManager>()
            .init_resource::<BattleMenu>()
            .init_resource::<EnemyHitEffects>()
            .init_resource::<PlayerDamageEffects>()
            .add_systems(Startup, spawn_battle_hud)
            .add_systems(
                Update,
                (toggle_battle_hud, update_health_bars, sync_battle_menu, apply_battle_effects),
            );
        app.update();
        app
    }

    fn root_visibility(app: &mut App) -> Visibility {
        *app.world_mut()
            .query_filtered::<&Visibility, With<BattleHudRoot>>()
            .single(app.world())
    }

    fn widget_visibility(app: &mut App, target: MenuWidget) -> Visibility {
        let mut query = app.world_mut().query::<(&MenuWidget, &Visibility)>();
        query
            .iter(app.world())
            .find(|(widget, _)| **widget == target)
            .map(|(_, visibility)| *visibility)
            .unwrap()
    }

    fn menu_text(app: &mut App, target: MenuText) -> String {
        let mut query = app.world_mut().query::<(&MenuText, &Text)>();
        query
            .iter(app.world())
            .find(|(kind, _)| **kind == target)
            .map(|(_, text)| text.0.clone())
            .unwrap()
    }

    fn ghoul() -> EnemyDescriptor {
        EnemyDescriptor {
            id: "ghoul".to_string(),
            name: "Ghoul".to_string(),
            max_health: 50,
            base_damage: 10,
            category: EnemyCategory::Zombie,
        }
    }

    #[test]
    fn test_hud_follows_battle_lifecycle() {
        let mut app = hud_app();
        let mut locks = ControlLocks::default();
        assert_eq!(root_visibility(&mut app), Visibility::Hidden);

        app.world_mut()
            .resource_mut::<BattleManager>()
            .start_battle(&ghoul(), &PlayerStats::default(), &mut locks);
        app.update();
        assert_eq!(root_visibility(&mut app), Visibility::Inherited);

        app.world_mut()
            .resource_mut::<BattleManager>()
            .end_battle(BattleOutcome::Victory, &mut locks);
        app.update();
        assert_eq!(root_visibility(&mut app), Visibility::Hidden);
    }

    #[test]
    fn test_hud_stays_up_when_next_battle_starts_same_frame() {
        let mut app = hud_app();
        let mut locks = ControlLocks::default();
        let player = PlayerStats::default();

        {
            let mut manager = app.world_mut().resource_mut::<BattleManager>();
            manager.start_battle(&ghoul(), &player, &mut locks);
            manager.end_battle(BattleOutcome::Fled, &mut locks);
            manager.start_battle(&ghoul(), &player, &mut locks);
        }
        app.update();
        assert_eq!(root_visibility(&mut app), Visibility::Inherited);

        {
            let mut manager = app.world_mut().resource_mut::<BattleManager>();
            manager.end_battle(BattleOutcome::Victory, &mut locks);
            manager.start_battle(&ghoul(), &player, &mut locks);
            manager.end_battle(BattleOutcome::Fled, &mut locks);
        }
        app.update();
        assert_eq!(root_visibility(&mut app), Visibility::Hidden);
    }

    #[test]
    fn test_health_bar_shows_label_and_fill() {
        let mut app = hud_app();
        app.world_mut().send_event(HealthBarUpdate {
            side: Combatant::Enemy,
            name: "Ghoul".to_string(),
            current: 35,
            max: 50,
        });
        app.update();

        let mut texts = app.world_mut().query::<(&HealthBarText, &Text)>();
        let value = texts
            .iter(app.world())
            .find(|(part, _)| **part == HealthBarText::Value(Combatant::Enemy))
            .map(|(_, text)| text.0.clone());
        assert_eq!(value.as_deref(), Some("35 / 50"));

        let mut fills = app.world_mut().query::<(&HealthBarFill, &Node)>();
        for (fill, node) in fills.iter(app.world()) {
            if fill.0 == Combatant::Enemy {
                assert_eq!(node.width, Val::Percent(70.0));
            } else {
                assert_eq!(node.width, Val::Percent(100.0));
            }
        }
    }

    #[test]
    fn test_menu_widgets_follow_screen() {
        let mut app = hud_app();

        let mut catalog = Catalog::default();
        catalog.insert_item(ItemDescriptor::weapon(
            "knife",
            "Knife",
            WeaponStats {
                base_damage: 10,
                effective_against: EnemyCategory::None,
                effectiveness_multiplier: 1.0,
                ammo_type: None,
            },
        ));
        let mut inventory = Inventory::default();
        inventory.add_item(catalog.item("knife").unwrap(), 1);
        let mut recent = RecentWeapons::default();

        app.world_mut().resource_mut::<BattleMenu>().open_main_menu();
        app.update();
        assert_eq!(widget_visibility(&mut app, MenuWidget::MainPanel), Visibility::Inherited);
        assert_eq!(widget_visibility(&mut app, MenuWidget::AttackPanel), Visibility::Hidden);

        // Attack screen opens on the empty Used tab
        app.world_mut()
            .resource_mut::<BattleMenu>()
            .handle_input(MenuInput::Confirm, &catalog, &mut inventory, &mut recent);
        app.update();
        assert_eq!(widget_visibility(&mut app, MenuWidget::AttackPanel), Visibility::Inherited);
        assert_eq!(widget_visibility(&mut app, MenuWidget::EmptyLabel), Visibility::Inherited);

        app.world_mut()
            .resource_mut::<BattleMenu>()
            .handle_input(MenuInput::Right, &catalog, &mut inventory, &mut recent);
        app.update();
        assert_eq!(widget_visibility(&mut app, MenuWidget::EmptyLabel), Visibility::Hidden);
        assert_eq!(widget_visibility(&mut app, MenuWidget::WeaponRow(0)), Visibility::Inherited);
        assert_eq!(widget_visibility(&mut app, MenuWidget::WeaponRow(1)), Visibility::Hidden);
        assert_eq!(menu_text(&mut app, MenuText::WeaponName(0)), "Knife");
        assert_eq!(menu_text(&mut app, MenuText::WeaponAmount(0)), "");
    }

    #[test]
    fn test_portrait_color_reaches_white_at_full_flash() {
        let white = portrait_color(1.0).to_srgba();
        for channel in [white.red, white.green, white.blue] {
            assert!((channel - 1.0).abs() < 1e-5);
        }
        assert_eq!(portrait_color(0.0), Color::srgb(0.35, 0.3, 0.32));
    }
}
