use core::time::Duration;

use bevy::prelude::*;

use crate::FONT;

/// Distance a floating text travels upward over its lifetime.
const RISE: f32 = 50.0;

pub struct FloatingTextPlugin;

impl Plugin for FloatingTextPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_floating_texts);
    }
}

/// Short-lived world-space text that rises and fades before despawning itself.
#[derive(Component)]
pub struct FloatingText {
    timer: Timer,
    initial_position: Vec2,
}

pub fn spawn_floating_text(
    commands: &mut Commands,
    asset_server: &Res<AssetServer>,
    position: Vec2,
    text: &str,
    color: Srgba,
    lifetime: Duration,
) -> Entity {
    commands
        .spawn((
            Text2d::new(text),
            TextFont {
                font: asset_server.load(FONT),
                font_size: 24.0,
                ..default()
            },
            TextLayout::new_with_justify(JustifyText::Center),
            TextColor(Color::Srgba(color)),
            Transform::from_xyz(position.x, position.y, 10.0),
            FloatingText {
                timer: Timer::new(lifetime, TimerMode::Once),
                initial_position: position,
            },
        ))
        .id()
}

pub fn animate_floating_texts(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut TextColor, &mut FloatingText)>,
) {
    for (entity, mut transform, mut color, mut floating_text) in &mut query {
        floating_text.timer.tick(time.delta());
        let progress = floating_text.timer.fraction();

        transform.translation.y = RISE.mul_add(progress, floating_text.initial_position.y);
        color.0.set_alpha(1.0 - progress);

        if floating_text.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
