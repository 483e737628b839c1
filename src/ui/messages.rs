//! Short on-screen messages such as "inventory full".

use bevy::prelude::*;

use crate::core::{Countdown, PlayerMessage};

/// Text node that shows the latest player message.
#[derive(Component)]
pub struct MessageText;

/// How long the current message stays up.
#[derive(Resource, Debug, Default)]
pub struct MessageDisplay {
    timer: Countdown,
}

impl MessageDisplay {
    pub fn is_showing(&self) -> bool {
        self.timer.is_running()
    }
}

/// Spawn the (hidden) message line at the top of the screen.
pub fn spawn_message_text(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            top: Val::Px(40.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.7)),
                Visibility::Hidden,
                MessageText,
            ));
        });
}

/// Show the newest message and hide it once its time is up.
pub fn show_player_messages(
    time: Res<Time>,
    mut messages: EventReader<PlayerMessage>,
    mut display: ResMut<MessageDisplay>,
    mut texts: Query<(&mut Text, &mut Visibility), With<MessageText>>,
) {
    if let Some(message) = messages.read().last() {
        display.timer.start(message.duration);
        for (mut text, mut visibility) in texts.iter_mut() {
            text.0 = message.text.clone();
            *visibility = Visibility::Inherited;
        }
        return;
    }

    if display.timer.tick(time.delta()) {
        for (_, mut visibility) in texts.iter_mut() {
            *visibility = Visibility::Hidden;
        }
    }
}
