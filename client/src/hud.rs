use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
    window::{CursorOptions, PrimaryWindow},
};

use crate::{cursor, door::DoorAnimation, player::Navigation};

const CONTROLS_HELP: &str = "WASD move | Shift sprint | Space jump/fly | Arrows fly | E door (walk-through)\n\
1 first person | 2 third person | G gravity | C collisions | R reset | Esc release mouse";

#[derive(Component)]
struct HudText;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(FrameTimeDiagnosticsPlugin::default());
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Update, update_hud);
}

fn spawn_hud(mut commands: Commands) {
    let font = TextFont {
        font_size: 14.0,
        ..default()
    };
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            ..default()
        },
        Text::new(""),
        font.clone(),
        TextColor(Color::WHITE),
        HudText,
    ));
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(12.0),
            ..default()
        },
        Text::new(CONTROLS_HELP),
        font,
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
    ));
}

fn update_hud(
    navigation: Res<Navigation>,
    door: Res<DoorAnimation>,
    diagnostics: Res<DiagnosticsStore>,
    cursor_options: Single<&CursorOptions, With<PrimaryWindow>>,
    mut text: Single<&mut Text, With<HudText>>,
) {
    let view = if navigation.is_first_person() && !cursor::is_locked(*cursor_options) {
        format!("{} (Click to lock mouse)", navigation.view_label())
    } else {
        navigation.view_label().to_string()
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    let p = navigation.camera_pose().eye;
    let toggles = navigation.toggles();
    let on_off = |b: bool| if b { "on" } else { "off" };

    text.0 = format!(
        "View: {view}\nPosition: X: {:.1}, Y: {:.1}, Z: {:.1}\nFPS: {fps:.0}\n\
         Gravity: {} | Collisions: {} | Door: {}",
        p.x,
        p.y,
        p.z,
        on_off(toggles.gravity_enabled),
        on_off(toggles.collisions_enabled),
        if door.state.is_open { "open" } else { "closed" },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_binding_and_door_passability() {
        for key in [
            "WASD", "Shift", "Space", "Arrows", "E door", "1 first", "2 third", "G gravity",
            "C collisions", "R reset", "Esc",
        ] {
            assert!(CONTROLS_HELP.contains(key), "missing {key}");
        }
        assert!(CONTROLS_HELP.contains("walk-through"));
    }
}
