use std::f32::consts::FRAC_PI_2;

/// Nominal physics time step in seconds.
///
/// Integration is calibrated to a 60 Hz display and is not measured from wall-clock time,
/// so a slower or faster frame rate makes the simulation run slower or faster.
pub const NOMINAL_DT: f32 = 0.016;

/// Gravity acceleration in meters per second squared (negative Y).
pub const GRAVITY: f32 = -20.0;

/// Jump launch speed in meters per second (upward).
pub const JUMP_VELOCITY: f32 = 8.0;

/// Horizontal impulse added per frame while a movement key is held (meters per frame).
pub const MOVE_SPEED: f32 = 0.15;

/// Multiplier applied to [`MOVE_SPEED`] while sprinting.
pub const SPRINT_MULTIPLIER: f32 = 2.0;

/// Multiplier applied to [`MOVE_SPEED`] for vertical free-fly steps when gravity is off.
pub const FLY_SPEED_MULTIPLIER: f32 = 2.0;

/// Eye height above the supporting surface (meters).
pub const STANDING_HEIGHT: f32 = 1.8;

/// Horizontal clearance kept from walls (meters).
pub const PLAYER_RADIUS: f32 = 0.5;

/// Downward reach of the ground probe (meters).
///
/// Must cover one frame of the fastest fall plus the standing height, and stay short enough
/// not to latch onto floors far below.
pub const GROUND_PROBE_RANGE: f32 = 2.0;

/// Exponential damping rate for planar velocity (per second).
pub const HORIZONTAL_DAMPING: f32 = 10.0;

/// Door angle when fully open (radians).
pub const DOOR_OPEN_ANGLE: f32 = FRAC_PI_2;

/// Door angular step per frame (radians).
pub const DOOR_ANGULAR_SPEED: f32 = 0.05;

/// Below this angular distance the door snaps onto its target (radians).
pub const DOOR_SETTLE_EPS: f32 = 0.01;

/// Meshes whose world-space extents are all below this size are not collidable (meters).
pub const MIN_COLLIDABLE_SIZE: f32 = 0.1;

/// Minimum squared length for a direction to be considered non-degenerate.
pub const DIRECTION_EPS_SQ: f32 = 1.0e-12;

/// Orbit camera distance limits (meters).
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 100.0;

/// Fraction of the pending orbit rotation applied each frame.
pub const ORBIT_DAMPING: f32 = 0.05;

/// Orbit rotation per pixel of mouse drag (radians).
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;

/// Orbit distance scale per unit of scroll.
pub const ORBIT_ZOOM_SCALE: f32 = 0.95;

/// Highest orbit elevation (radians). Kept just below straight-down to avoid a degenerate basis.
pub const ORBIT_MAX_ELEVATION: f32 = FRAC_PI_2 - 0.01;

/// First-person look rotation per pixel of mouse motion (radians).
pub const LOOK_SENSITIVITY: f32 = 0.002;

/// First-person pitch limit (radians).
pub const LOOK_MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Horizontal offset of the first-person spawn point from the scene center (meters).
pub const FIRST_PERSON_SPAWN_OFFSET: f32 = 10.0;
