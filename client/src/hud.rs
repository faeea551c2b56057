use bevy::prelude::*;

use crate::settings::ClientSettings;

const INSTRUCTIONS: &str = "Click to capture the mouse, Esc to release\n\
    Mouse: look    W/A/S/D: move    Space: jump\n\
    R: toggle auto-run    Wheel: zoom\n\
    F5: save scene    F7: load scene";

#[derive(Component)]
struct AutoRunLabel;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(
        Update,
        update_auto_run_label.run_if(resource_changed::<ClientSettings>),
    );
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(INSTRUCTIONS),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
            ));
            parent.spawn((
                AutoRunLabel,
                Text::default(),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
            ));
        });
}

fn update_auto_run_label(
    settings: Res<ClientSettings>,
    mut label: Single<&mut Text, With<AutoRunLabel>>,
) {
    label.0 = format!("Auto-run: {}", if settings.auto_run { "on" } else { "off" });
}
