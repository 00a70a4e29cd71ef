pub mod collision;
pub mod constants;
pub mod door;
pub mod motion;
pub mod movement;
pub mod navigation;
pub mod scene;
pub mod settings;

pub use collision::{CollisionWorld, RayHit, SceneQuery, SurfaceDef, SurfaceHandle, SurfaceShape};
pub use constants::{MIN_COLLIDABLE_SIZE, NOMINAL_DT};
pub use door::DoorState;
pub use motion::{FacingBasis, MoveState};
pub use movement::{
    LocomotionController, PhysicsToggles, PlanarVelocity, PlayerKinematics, step_horizontal,
    step_locomotion, step_vertical, try_jump,
};
pub use navigation::{CameraPose, LookAngles, NavigationMode, Navigator, OrbitCamera};
pub use scene::{SceneBounds, is_collidable_extent, is_door_name};
pub use settings::{DoorSettings, LocomotionSettings, OrbitSettings};
