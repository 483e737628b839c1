//! Inventory screen - category tabs over the ledger, with discarding.

use bevy::prelude::*;

use crate::battle::MenuInput;
use crate::core::PlayerMessage;
use crate::inventory::{Inventory, DEFAULT_MAX_SLOTS, MESSAGE_DISPLAY_DURATION};
use crate::items::{Catalog, ItemCategory};
use crate::player::{ControlLockId, ControlLocks};

/// Rows in the item list.
pub const INVENTORY_ROW_COUNT: usize = DEFAULT_MAX_SLOTS;

const PANEL_COLOR: Color = Color::srgba(0.04, 0.04, 0.06, 0.95);
const TEXT_COLOR: Color = Color::srgb(0.8, 0.8, 0.85);
const SELECTED_COLOR: Color = Color::srgb(0.95, 0.8, 0.3);
const EMPTY_TAB_TEXT: &str = "Nothing here";
const BROWSE_HINT: &str = "Enter: discard   Tab/Esc: close";

/// Open/closed state and cursor of the inventory screen.
#[derive(Resource, Debug, Default)]
pub struct InventoryScreen {
    open: bool,
    tab: ItemCategory,
    cursor: usize,
    confirming_discard: bool,
}

/// What the screen wants done after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Close,
    /// Discard the ledger slot at this index.
    Discard(usize),
}

impl InventoryScreen {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_tab(&self) -> ItemCategory {
        self.tab
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_confirming_discard(&self) -> bool {
        self.confirming_discard
    }

    /// Open on the first tab. Refused while any other control lock is held.
    pub fn open(&mut self, locks: &mut ControlLocks) -> bool {
        if self.open || locks.is_locked() {
            return false;
        }
        locks.lock(ControlLockId::Inventory);
        *self = Self {
            open: true,
            ..default()
        };
        true
    }

    pub fn close(&mut self, locks: &mut ControlLocks) -> bool {
        if !self.open {
            return false;
        }
        locks.unlock(ControlLockId::Inventory);
        self.open = false;
        self.confirming_discard = false;
        true
    }

    /// Ledger indices listed on the current tab.
    pub fn rows(&self, inventory: &Inventory, catalog: &Catalog) -> Vec<usize> {
        inventory
            .slots_in_category(catalog, self.tab)
            .into_iter()
            .map(|(index, _)| index)
            .collect()
    }

    pub fn handle_input(&mut self, input: MenuInput, inventory: &Inventory, catalog: &Catalog) -> ScreenAction {
        if !self.open {
            return ScreenAction::None;
        }

        let rows = self.rows(inventory, catalog);
        // The ledger may have shrunk since the last input.
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));

        if self.confirming_discard {
            self.confirming_discard = false;
            return match (input, rows.get(self.cursor)) {
                (MenuInput::Confirm, Some(&index)) => ScreenAction::Discard(index),
                _ => ScreenAction::None,
            };
        }

        match input {
            MenuInput::Up if !rows.is_empty() => {
                self.cursor = (self.cursor + rows.len() - 1) % rows.len();
            }
            MenuInput::Down if !rows.is_empty() => {
                self.cursor = (self.cursor + 1) % rows.len();
            }
            MenuInput::Left => self.cycle_tab(ItemCategory::ALL.len() - 1),
            MenuInput::Right => self.cycle_tab(1),
            MenuInput::Confirm if !rows.is_empty() => self.confirming_discard = true,
            MenuInput::Back => return ScreenAction::Close,
            _ => {}
        }
        ScreenAction::None
    }

    fn cycle_tab(&mut self, step: usize) {
        let tabs = ItemCategory::ALL;
        let current = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        self.tab = tabs[(current + step) % tabs.len()];
        self.cursor = 0;
    }
}

/// Root of the inventory screen.
#[derive(Component)]
pub struct InventoryScreenRoot;

/// Inventory nodes whose visibility follows the screen state.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum InventoryWidget {
    EmptyLabel,
    Row(usize),
}

/// Inventory text whose content or highlight follows the screen state.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum InventoryText {
    Tab(ItemCategory),
    ItemName(usize),
    ItemAmount(usize),
    Hint,
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

/// Spawn the inventory screen, hidden.
pub fn spawn_inventory_screen(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            InventoryScreenRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(16.0)),
                    row_gap: Val::Px(4.0),
                    min_width: Val::Px(360.0),
                    ..default()
                },
                BackgroundColor(PANEL_COLOR),
            ))
            .with_children(|panel| {
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(16.0),
                        margin: UiRect::bottom(Val::Px(8.0)),
                        ..default()
                    })
                    .with_children(|tabs| {
                        for tab in ItemCategory::ALL {
                            tabs.spawn((text_bundle(tab.label(), 18.0), InventoryText::Tab(tab)));
                        }
                    });

                for index in 0..INVENTORY_ROW_COUNT {
                    panel
                        .spawn((
                            Node {
                                flex_direction: FlexDirection::Row,
                                justify_content: JustifyContent::SpaceBetween,
                                ..default()
                            },
                            Visibility::Hidden,
                            InventoryWidget::Row(index),
                        ))
                        .with_children(|row| {
                            row.spawn((text_bundle("", 18.0), InventoryText::ItemName(index)));
                            row.spawn((text_bundle("", 18.0), InventoryText::ItemAmount(index)));
                        });
                }

                panel.spawn((
                    text_bundle(EMPTY_TAB_TEXT, 18.0),
                    Visibility::Hidden,
                    InventoryWidget::EmptyLabel,
                ));
                panel.spawn((text_bundle(BROWSE_HINT, 14.0), InventoryText::Hint));
            });
        });
}

/// Open or close the inventory with Tab.
pub fn toggle_inventory_screen(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut screen: ResMut<InventoryScreen>,
    mut locks: ResMut<ControlLocks>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }

    if screen.is_open() {
        screen.close(&mut locks);
    } else if !screen.open(&mut locks) {
        debug!("Inventory stays closed while control is locked");
    }
}

/// Move through the open inventory and discard what the player asks for.
pub fn navigate_inventory_screen(
    mut inputs: EventReader<MenuInput>,
    mut screen: ResMut<InventoryScreen>,
    catalog: Res<Catalog>,
    mut inventory: ResMut<Inventory>,
    mut locks: ResMut<ControlLocks>,
    mut messages: EventWriter<PlayerMessage>,
) {
    if !screen.is_open() {
        inputs.clear();
        return;
    }

    for input in inputs.read() {
        match screen.handle_input(*input, &inventory, &catalog) {
            ScreenAction::None => {}
            ScreenAction::Close => {
                screen.close(&mut locks);
                break;
            }
            ScreenAction::Discard(index) => {
                let name = inventory
                    .slots()
                    .get(index)
                    .and_then(|slot| catalog.item(&slot.item_id))
                    .map(|item| item.name.clone())
                    .unwrap_or_default();

                if inventory.discard_slot(index, &catalog) {
                    info!("Discarded {}", name);
                } else {
                    messages.send(PlayerMessage::new(
                        "This item cannot be discarded",
                        MESSAGE_DISPLAY_DURATION,
                    ));
                }
            }
        }
    }
}

/// Mirror the screen state and the ledger onto the inventory nodes.
pub fn sync_inventory_screen(
    screen: Res<InventoryScreen>,
    inventory: Res<Inventory>,
    catalog: Res<Catalog>,
    mut roots: Query<&mut Visibility, (With<InventoryScreenRoot>, Without<InventoryWidget>)>,
    mut widgets: Query<(&InventoryWidget, &mut Visibility), Without<InventoryScreenRoot>>,
    mut texts: Query<(&InventoryText, &mut Text, &mut TextColor)>,
) {
    if !screen.is_changed() && !inventory.is_changed() {
        return;
    }

    let shown = |visible: bool| {
        if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        }
    };

    for mut visibility in roots.iter_mut() {
        visibility.set_if_neq(shown(screen.is_open()));
    }

    let rows = screen.rows(&inventory, &catalog);
    // Scroll so the cursor stays inside the visible rows.
    let offset = screen.cursor().saturating_sub(INVENTORY_ROW_COUNT - 1);

    for (widget, mut visibility) in widgets.iter_mut() {
        *visibility = shown(match *widget {
            InventoryWidget::EmptyLabel => rows.is_empty(),
            InventoryWidget::Row(index) => offset + index < rows.len(),
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
            InventoryText::Tab(tab) => {
                color.0 = highlight(tab == screen.current_tab());
            }
            InventoryText::ItemName(index) => {
                let row = offset + index;
                text.0 = rows
                    .get(row)
                    .and_then(|&slot| inventory.slots().get(slot))
                    .and_then(|slot| catalog.item(&slot.item_id))
                    .map(|item| item.name.clone())
                    .unwrap_or_default();
                color.0 = highlight(screen.cursor() == row);
            }
            InventoryText::ItemAmount(index) => {
                let row = offset + index;
                text.0 = rows
                    .get(row)
                    .and_then(|&slot| inventory.slots().get(slot))
                    .filter(|slot| slot.quantity > 1)
                    .map(|slot| format!("x{}", slot.quantity))
                    .unwrap_or_default();
                color.0 = highlight(screen.cursor() == row);
            }
            InventoryText::Hint => {
                text.0 = match rows.get(screen.cursor()) {
                    Some(&slot) if screen.is_confirming_discard() => {
                        let name = inventory
                            .slots()
                            .get(slot)
                            .and_then(|slot| catalog.item(&slot.item_id))
                            .map_or("this item", |item| item.name.as_str());
                        format!("Discard {}? Enter: yes   any other key: no", name)
                    }
                    _ => BROWSE_HINT.to_string(),
                };
            }
        }
    }
}
