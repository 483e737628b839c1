//! Keyboard bindings for the battle menu.

use bevy::prelude::*;

use super::menu::MenuInput;

/// Translate this frame's key presses into menu input events.
pub fn read_menu_keys(keyboard: Res<ButtonInput<KeyCode>>, mut inputs: EventWriter<MenuInput>) {
    let pressed = |keys: &[KeyCode]| keyboard.any_just_pressed(keys.iter().copied());

    if pressed(&[KeyCode::ArrowUp, KeyCode::KeyW]) {
        inputs.send(MenuInput::Up);
    } else if pressed(&[KeyCode::ArrowDown, KeyCode::KeyS]) {
        inputs.send(MenuInput::Down);
    }

    if pressed(&[KeyCode::ArrowLeft, KeyCode::KeyA]) {
        inputs.send(MenuInput::Left);
    } else if pressed(&[KeyCode::ArrowRight, KeyCode::KeyD]) {
        inputs.send(MenuInput::Right);
    }

    if pressed(&[KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::KeyE]) {
        inputs.send(MenuInput::Confirm);
    }

    if pressed(&[KeyCode::Escape]) {
        inputs.send(MenuInput::Back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Received(Vec<MenuInput>);

    fn record(mut inputs: EventReader<MenuInput>, mut log: ResMut<Received>) {
        log.0.extend(inputs.read().copied());
    }

    #[test]
    fn test_keys_map_to_menu_input() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Received>()
            .add_event::<MenuInput>()
            .add_systems(Update, (read_menu_keys, record).chain());

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::KeyW);
            keyboard.press(KeyCode::ArrowRight);
            keyboard.press(KeyCode::NumpadEnter);
        }
        app.update();

        assert_eq!(
            app.world().resource::<Received>().0,
            vec![MenuInput::Up, MenuInput::Right, MenuInput::Confirm]
        );
    }
}
