//! First-person body and camera mode, driven once per frame with a fixed step.

use bevy::{
    prelude::*,
    window::{CursorOptions, PrimaryWindow},
};
use walkthrough_shared::{CollisionWorld, NOMINAL_DT, Navigator};

use crate::{cursor, input::HeldIntent};

/// Navigation state for the session. Single writer: [`apply_commands`] then [`step`].
#[derive(Resource, Default, Deref, DerefMut)]
pub struct Navigation(pub Navigator);

/// Static collidable surfaces. Grows once when the model finishes loading.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct Collision(pub CollisionWorld);

/// Edge-triggered user commands, consumed before the next physics step.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum NavigationCommand {
    FirstPerson,
    ThirdPerson,
    Reset,
    ToggleGravity,
    ToggleCollisions,
    ToggleDoor,
    Jump,
    Pointer { delta: Vec2, dragging: bool },
    Zoom(f32),
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationStep;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Navigation>();
    app.init_resource::<Collision>();
    app.add_message::<NavigationCommand>();

    app.add_systems(Startup, check_settings);

    app.add_systems(
        Update,
        (apply_commands, step).chain().in_set(NavigationStep),
    );
}

fn check_settings(navigation: Res<Navigation>) {
    if let Err(e) = navigation.validate() {
        error!("Invalid navigation settings: {e}");
    }
}

fn apply_commands(
    mut commands: MessageReader<NavigationCommand>,
    mut navigation: ResMut<Navigation>,
    cursor_options: Single<&CursorOptions, With<PrimaryWindow>>,
) {
    let locked = cursor::is_locked(*cursor_options);

    for command in commands.read() {
        match *command {
            NavigationCommand::FirstPerson => navigation.enter_first_person(),
            NavigationCommand::ThirdPerson => navigation.enter_third_person(),
            NavigationCommand::Reset => navigation.reset(),
            NavigationCommand::ToggleGravity => {
                navigation.toggle_gravity();
            }
            NavigationCommand::ToggleCollisions => {
                navigation.toggle_collisions();
            }
            NavigationCommand::Jump => {
                if locked {
                    navigation.jump();
                }
            }
            NavigationCommand::Pointer { delta, dragging } => {
                let engaged = if navigation.is_first_person() {
                    locked
                } else {
                    dragging
                };
                if engaged {
                    navigation.pointer_motion(delta.x, delta.y);
                }
            }
            NavigationCommand::Zoom(steps) => navigation.zoom(steps),
            // Handled by the door plugin.
            NavigationCommand::ToggleDoor => {}
        }
    }
}

fn step(
    mut navigation: ResMut<Navigation>,
    collision: Res<Collision>,
    held: Res<HeldIntent>,
    cursor_options: Single<&CursorOptions, With<PrimaryWindow>>,
) {
    let engaged = cursor::is_locked(*cursor_options);
    navigation.step(&collision.0, &held.0, engaged, NOMINAL_DT);
}
