use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    input::InputAction,
    player::{Navigation, NavigationStep},
};

pub(super) fn plugin(app: &mut App) {
    // Grab/release before the step so the frame sees the new lock state.
    app.add_systems(
        Update,
        (lock_on_click, release_pointer).chain().before(NavigationStep),
    );
}

/// Movement and mouse look only apply while the pointer is captured.
#[inline]
pub fn is_locked(cursor: &CursorOptions) -> bool {
    cursor.grab_mode != CursorGrabMode::None
}

fn set_locked(cursor: &mut CursorOptions, locked: bool) {
    if locked {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// A click in first person captures the pointer.
fn lock_on_click(
    actions: Res<ActionState<InputAction>>,
    navigation: Res<Navigation>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if navigation.is_first_person()
        && !is_locked(&cursor)
        && actions.just_pressed(&InputAction::Drag)
    {
        set_locked(&mut cursor, true);
        info!("pointer locked");
    }
}

/// Escape, or leaving first person, gives the pointer back.
fn release_pointer(
    keys: Res<ButtonInput<KeyCode>>,
    navigation: Res<Navigation>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !is_locked(&cursor) {
        return;
    }
    if keys.just_pressed(KeyCode::Escape) || !navigation.is_first_person() {
        set_locked(&mut cursor, false);
        info!("pointer released");
    }
}
