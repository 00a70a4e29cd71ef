use bevy::prelude::*;
use walkthrough_shared::{DoorSettings, DoorState};

use crate::player::{NavigationCommand, NavigationStep};

/// The door leaf found in the loaded model.
#[derive(Component, Debug)]
pub struct Door {
    /// Rotation of the leaf as authored; the swing is applied on top of it.
    pub base_rotation: Quat,
}

#[derive(Resource, Debug, Default)]
pub struct DoorAnimation {
    pub state: DoorState,
    pub settings: DoorSettings,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DoorAnimation>();
    app.add_systems(Startup, check_settings);
    app.add_systems(
        Update,
        (toggle_door, swing_door).chain().after(NavigationStep),
    );
}

fn check_settings(animation: Res<DoorAnimation>) {
    if let Err(e) = animation.settings.validate() {
        error!("Invalid door settings: {e}");
    }
}

fn toggle_door(
    mut commands: MessageReader<NavigationCommand>,
    mut animation: ResMut<DoorAnimation>,
) {
    for command in commands.read() {
        if *command == NavigationCommand::ToggleDoor {
            animation.state.toggle();
        }
    }
}

fn swing_door(
    mut animation: ResMut<DoorAnimation>,
    door: Single<(&Door, &mut Transform)>,
) {
    let DoorAnimation { state, settings } = &mut *animation;
    if !state.step(settings) {
        return;
    }
    let (door, mut transform) = door.into_inner();
    transform.rotation = door.base_rotation * Quat::from_rotation_y(state.current_angle);
}
