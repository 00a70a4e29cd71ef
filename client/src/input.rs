use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use walkthrough_shared::MoveState;

use crate::player::{Navigation, NavigationCommand, NavigationStep};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    Sprint,
    /// Jump with gravity, fly up without.
    Jump,
    FlyUp,
    FlyDown,
    ToggleDoor,
    FirstPerson,
    ThirdPerson,
    ToggleGravity,
    ToggleCollisions,
    Reset,
    /// Held to orbit the third-person camera.
    Drag,
    #[actionlike(DualAxis)]
    Look,
    #[actionlike(Axis)]
    Zoom,
}

/// Intent flags for the current frame, written only by [`update_move_state`].
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct HeldIntent(pub MoveState);

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();
    app.init_resource::<HeldIntent>();

    app.insert_resource(default_input_map());
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(
        Update,
        (update_move_state, send_commands).before(NavigationStep),
    );
}

fn default_input_map() -> InputMap<InputAction> {
    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Forward, KeyCode::KeyW);
    input_map.insert(InputAction::Backward, KeyCode::KeyS);
    input_map.insert(InputAction::Left, KeyCode::KeyA);
    input_map.insert(InputAction::Right, KeyCode::KeyD);
    input_map.insert(InputAction::Sprint, KeyCode::ShiftLeft);
    input_map.insert(InputAction::Jump, KeyCode::Space);
    input_map.insert(InputAction::FlyUp, KeyCode::ArrowUp);
    input_map.insert(InputAction::FlyDown, KeyCode::ArrowDown);
    input_map.insert(InputAction::ToggleDoor, KeyCode::KeyE);
    input_map.insert(InputAction::FirstPerson, KeyCode::Digit1);
    input_map.insert(InputAction::ThirdPerson, KeyCode::Digit2);
    input_map.insert(InputAction::ToggleGravity, KeyCode::KeyG);
    input_map.insert(InputAction::ToggleCollisions, KeyCode::KeyC);
    input_map.insert(InputAction::Reset, KeyCode::KeyR);
    input_map.insert(InputAction::Drag, MouseButton::Left);
    input_map.insert_dual_axis(InputAction::Look, MouseMove::default());
    input_map.insert_axis(InputAction::Zoom, MouseScrollAxis::Y);
    input_map
}

/// Mirror held keys into the intent flags. Vertical fly intents only exist with gravity off.
fn update_move_state(
    actions: Res<ActionState<InputAction>>,
    navigation: Res<Navigation>,
    mut held: ResMut<HeldIntent>,
) {
    let flying = !navigation.toggles().gravity_enabled;
    let jump = actions.pressed(&InputAction::Jump);

    held.0 = MoveState {
        forward: actions.pressed(&InputAction::Forward),
        backward: actions.pressed(&InputAction::Backward),
        left: actions.pressed(&InputAction::Left),
        right: actions.pressed(&InputAction::Right),
        up: flying && (actions.pressed(&InputAction::FlyUp) || jump),
        down: flying && actions.pressed(&InputAction::FlyDown),
        sprint: actions.pressed(&InputAction::Sprint),
        jump,
    };
}

fn send_commands(
    actions: Res<ActionState<InputAction>>,
    mut commands: MessageWriter<NavigationCommand>,
) {
    const EDGES: [(InputAction, NavigationCommand); 7] = [
        (InputAction::Jump, NavigationCommand::Jump),
        (InputAction::ToggleDoor, NavigationCommand::ToggleDoor),
        (InputAction::FirstPerson, NavigationCommand::FirstPerson),
        (InputAction::ThirdPerson, NavigationCommand::ThirdPerson),
        (InputAction::ToggleGravity, NavigationCommand::ToggleGravity),
        (InputAction::ToggleCollisions, NavigationCommand::ToggleCollisions),
        (InputAction::Reset, NavigationCommand::Reset),
    ];

    for (action, command) in EDGES {
        if actions.just_pressed(&action) {
            commands.write(command);
        }
    }

    let look = actions.axis_pair(&InputAction::Look);
    if look != Vec2::ZERO {
        commands.write(NavigationCommand::Pointer {
            delta: look,
            dragging: actions.pressed(&InputAction::Drag),
        });
    }

    let zoom = actions.value(&InputAction::Zoom);
    if zoom != 0.0 {
        commands.write(NavigationCommand::Zoom(zoom));
    }
}
