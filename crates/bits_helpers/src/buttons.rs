use bevy::prelude::*;

use crate::FONT;

pub const BUTTON_COLOR: Color = Color::srgb(0.15, 0.15, 0.15);
pub const BUTTON_HOVERED_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
pub const BUTTON_PRESSED_COLOR: Color = Color::srgb(0.35, 0.75, 0.35);

/// Entities removed when their owning screen goes away.
#[derive(Component)]
pub struct CleanupMarker;

/// Spawns a text button carrying `marker` as a child of a UI node.
pub fn spawn_text_button<M: Component>(
    parent: &mut ChildBuilder,
    asset_server: &Res<AssetServer>,
    label: &str,
    marker: M,
) -> Entity {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                margin: UiRect::all(Val::Px(4.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        })
        .id()
}

/// Tints buttons according to their interaction.
pub fn button_feedback(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED_COLOR,
            Interaction::Hovered => BUTTON_HOVERED_COLOR,
            Interaction::None => BUTTON_COLOR,
        };
    }
}

/// Markers of the buttons pressed this frame.
pub fn pressed_buttons<'a, M: Component>(
    buttons: &'a Query<(&Interaction, &M), (Changed<Interaction>, With<Button>)>,
) -> impl Iterator<Item = &'a M> {
    buttons
        .iter()
        .filter(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, marker)| marker)
}

pub fn cleanup_marked_entities(mut commands: Commands, query: Query<Entity, With<CleanupMarker>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
