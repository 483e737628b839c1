//! Battle menu navigation.
//!
//! The menu has a main screen (Attack / Items / Run) and an attack screen
//! that combines the weapon tab strip with the weapon list of the selected
//! tab. Left/right switch tabs, up/down move through the list, and both
//! cursors wrap around at the ends.

use bevy::prelude::*;

use super::recent::{RecentWeapons, MAX_RECENT_WEAPONS};
use crate::inventory::Inventory;
use crate::items::Catalog;

/// Discrete menu input, independent of the device that produced it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
}

/// Entries of the main battle menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    Attack,
    Items,
    Run,
}

impl MainMenuOption {
    pub const ALL: [MainMenuOption; 3] = [Self::Attack, Self::Items, Self::Run];

    pub fn label(self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Items => "Items",
            Self::Run => "Run",
        }
    }
}

/// Weapon list filters shown as tabs on the attack screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponTab {
    /// Recently used weapons still held, most recent first.
    Used,
    /// Weapons that need no ammo.
    Basic,
    /// Weapons that consume ammo.
    Limited,
}

impl WeaponTab {
    pub const ALL: [WeaponTab; 3] = [Self::Used, Self::Basic, Self::Limited];

    pub fn label(self) -> &'static str {
        match self {
            Self::Used => "USED",
            Self::Basic => "BASIC",
            Self::Limited => "LIMITED",
        }
    }
}

/// Which menu screen is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuScreen {
    #[default]
    Closed,
    Main,
    Attack,
}

/// One row of the weapon list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponEntry {
    pub weapon_id: String,
    pub name: String,
    /// Ammo held for this weapon; only shown on the Limited tab.
    pub ammo: Option<u32>,
}

impl WeaponEntry {
    /// Text for the amount column, e.g. `"x3"`, or empty.
    pub fn amount_label(&self) -> String {
        self.ammo.map(|count| format!("x{count}")).unwrap_or_default()
    }
}

/// What the caller has to do after a menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    None,
    /// Items or Run was chosen.
    EndBattle,
    /// The weapon was confirmed; ammo is already spent and the menu closed.
    Attack(String),
    /// The weapon cannot be used right now (no ammo). Nothing was spent.
    Blocked(String),
}

/// Build the weapon list for `tab` from what the player currently holds.
pub fn filter_weapons(
    tab: WeaponTab,
    catalog: &Catalog,
    inventory: &Inventory,
    recent: &RecentWeapons,
) -> Vec<WeaponEntry> {
    let held = inventory.held_weapons(catalog);

    let entry = |id: &str, name: &str, ammo: Option<u32>| WeaponEntry {
        weapon_id: id.to_string(),
        name: name.to_string(),
        ammo,
    };

    match tab {
        WeaponTab::Used => recent
            .ids()
            .iter()
            .filter_map(|id| held.iter().find(|w| &w.id == id))
            .take(MAX_RECENT_WEAPONS)
            .map(|w| entry(&w.id, &w.name, None))
            .collect(),
        WeaponTab::Basic => held
            .iter()
            .filter(|w| w.as_weapon().is_some_and(|s| !s.requires_ammo()))
            .map(|w| entry(&w.id, &w.name, None))
            .collect(),
        WeaponTab::Limited => held
            .iter()
            .filter_map(|w| {
                let ammo = w.as_weapon()?.ammo_type.as_ref()?;
                Some(entry(&w.id, &w.name, Some(inventory.quantity(ammo))))
            })
            .collect(),
    }
}

/// Cursor state of the battle menu.
#[derive(Resource, Debug, Default)]
pub struct BattleMenu {
    screen: MenuScreen,
    main_index: usize,
    tab_index: usize,
    weapon_index: Option<usize>,
    entries: Vec<WeaponEntry>,
}

fn wrap_next(index: usize, len: usize) -> usize {
    if index + 1 >= len {
        0
    } else {
        index + 1
    }
}

fn wrap_previous(index: usize, len: usize) -> usize {
    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

impl BattleMenu {
    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    pub fn is_open(&self) -> bool {
        self.screen != MenuScreen::Closed
    }

    pub fn selected_option(&self) -> MainMenuOption {
        MainMenuOption::ALL[self.main_index]
    }

    pub fn current_tab(&self) -> WeaponTab {
        WeaponTab::ALL[self.tab_index]
    }

    pub fn entries(&self) -> &[WeaponEntry] {
        &self.entries
    }

    pub fn selected_weapon_index(&self) -> Option<usize> {
        self.weapon_index
    }

    pub fn selected_weapon(&self) -> Option<&WeaponEntry> {
        self.weapon_index.and_then(|i| self.entries.get(i))
    }

    /// The filtered list is empty and the empty-state label should show.
    pub fn is_empty_state(&self) -> bool {
        self.screen == MenuScreen::Attack && self.entries.is_empty()
    }

    /// Show the main screen with the first option selected.
    pub fn open_main_menu(&mut self) {
        self.screen = MenuScreen::Main;
        self.main_index = 0;
        self.weapon_index = None;
    }

    pub fn close(&mut self) {
        self.screen = MenuScreen::Closed;
        self.weapon_index = None;
    }

    /// Show the attack screen on the Used tab.
    pub fn open_attack_menu(&mut self, catalog: &Catalog, inventory: &Inventory, recent: &RecentWeapons) {
        self.screen = MenuScreen::Attack;
        self.tab_index = 0;
        self.refresh(catalog, inventory, recent);
    }

    /// Rebuild the weapon list for the current tab and select its first row.
    pub fn refresh(&mut self, catalog: &Catalog, inventory: &Inventory, recent: &RecentWeapons) {
        self.entries = filter_weapons(self.current_tab(), catalog, inventory, recent);
        self.weapon_index = if self.entries.is_empty() { None } else { Some(0) };
    }

    /// Apply one input event.
    ///
    /// Confirming a weapon records it as recently used, spends one unit of
    /// ammo if it needs any, and closes the menu before handing the weapon
    /// back to the caller.
    pub fn handle_input(
        &mut self,
        input: MenuInput,
        catalog: &Catalog,
        inventory: &mut Inventory,
        recent: &mut RecentWeapons,
    ) -> MenuOutcome {
        match self.screen {
            MenuScreen::Closed => MenuOutcome::None,
            MenuScreen::Main => self.handle_main_input(input, catalog, inventory, recent),
            MenuScreen::Attack => self.handle_attack_input(input, catalog, inventory, recent),
        }
    }

    fn handle_main_input(
        &mut self,
        input: MenuInput,
        catalog: &Catalog,
        inventory: &Inventory,
        recent: &RecentWeapons,
    ) -> MenuOutcome {
        let len = MainMenuOption::ALL.len();
        match input {
            MenuInput::Down => self.main_index = wrap_next(self.main_index, len),
            MenuInput::Up => self.main_index = wrap_previous(self.main_index, len),
            MenuInput::Confirm => match self.selected_option() {
                MainMenuOption::Attack => self.open_attack_menu(catalog, inventory, recent),
                // No item-use flow exists yet; Items behaves like Run.
                MainMenuOption::Items | MainMenuOption::Run => {
                    self.close();
                    return MenuOutcome::EndBattle;
                }
            },
            MenuInput::Left | MenuInput::Right | MenuInput::Back => {}
        }
        MenuOutcome::None
    }

    fn handle_attack_input(
        &mut self,
        input: MenuInput,
        catalog: &Catalog,
        inventory: &mut Inventory,
        recent: &mut RecentWeapons,
    ) -> MenuOutcome {
        let tabs = WeaponTab::ALL.len();
        match input {
            MenuInput::Right => {
                self.tab_index = wrap_next(self.tab_index, tabs);
                self.refresh(catalog, inventory, recent);
            }
            MenuInput::Left => {
                self.tab_index = wrap_previous(self.tab_index, tabs);
                self.refresh(catalog, inventory, recent);
            }
            MenuInput::Down => {
                if let Some(index) = self.weapon_index {
                    self.weapon_index = Some(wrap_next(index, self.entries.len()));
                }
            }
            MenuInput::Up => {
                if let Some(index) = self.weapon_index {
                    self.weapon_index = Some(wrap_previous(index, self.entries.len()));
                }
            }
            MenuInput::Back => self.open_main_menu(),
            MenuInput::Confirm => return self.confirm_weapon(catalog, inventory, recent),
        }
        MenuOutcome::None
    }

    fn confirm_weapon(
        &mut self,
        catalog: &Catalog,
        inventory: &mut Inventory,
        recent: &mut RecentWeapons,
    ) -> MenuOutcome {
        let Some(entry) = self.selected_weapon() else {
            return MenuOutcome::None;
        };
        let weapon_id = entry.weapon_id.clone();

        let Some(stats) = catalog.weapon(&weapon_id) else {
            warn!("Weapon '{}' is missing from the catalog", weapon_id);
            return MenuOutcome::None;
        };

        if !inventory.can_use(stats) {
            info!("No ammo left for {}", entry.name);
            return MenuOutcome::Blocked(weapon_id);
        }

        recent.record(&weapon_id);
        if let Some(ammo) = &stats.ammo_type {
            inventory.consume_item(ammo, 1);
        }

        self.close();
        MenuOutcome::Attack(weapon_id)
    }
}
