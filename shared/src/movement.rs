//! First-person locomotion: gravity, ground snapping, jumping and per-axis wall sliding.
//!
//! Every function here is a pure update over explicit value types. The only collaborator is a
//! [`SceneQuery`], so tests can drive the controller against a real `CollisionWorld` or a fake.

use crate::{
    collision::{SceneQuery, Vec3},
    motion::{FacingBasis, MoveState},
    settings::LocomotionSettings,
};

/// Position and vertical state of the first-person body (eye point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerKinematics {
    pub position: Vec3,
    /// Meters per second, positive is up.
    pub vertical_velocity: f32,
    pub is_on_ground: bool,
}

impl PlayerKinematics {
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            is_on_ground: false,
        }
    }
}

/// Horizontal velocity in the camera-local basis, as displacement per frame.
///
/// `forward` is along the flattened facing, `right` along `forward x up`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanarVelocity {
    pub forward: f32,
    pub right: f32,
}

/// Session-wide physics switches. Both start enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicsToggles {
    pub gravity_enabled: bool,
    pub collisions_enabled: bool,
}

impl Default for PhysicsToggles {
    fn default() -> Self {
        Self {
            gravity_enabled: true,
            collisions_enabled: true,
        }
    }
}

/// Advance the vertical axis by one step.
///
/// With gravity on: integrate, probe for ground below the candidate height, land or stay
/// airborne, then clamp to the absolute floor. With gravity off: free-fly by a fixed step.
/// The ground probe ignores `collisions_enabled`.
pub fn step_vertical<Q: SceneQuery + ?Sized>(
    scene: &Q,
    settings: &LocomotionSettings,
    toggles: PhysicsToggles,
    intent: &MoveState,
    body: &mut PlayerKinematics,
    dt: f32,
) {
    if !toggles.gravity_enabled {
        body.vertical_velocity = 0.0;
        body.is_on_ground = false;
        body.position.y += intent.vertical_input() * settings.fly_step();
        return;
    }

    body.vertical_velocity += settings.gravity * dt;
    let candidate_y = body.position.y + body.vertical_velocity * dt;
    let probe_from = Vec3::new(body.position.x, candidate_y, body.position.z);

    let landing = scene
        .ground_probe(&probe_from, settings.ground_probe_range)
        .filter(|hit| {
            body.vertical_velocity <= 0.0 && candidate_y - hit.point.y <= settings.standing_height
        });

    match landing {
        Some(hit) => {
            body.position.y = hit.point.y + settings.standing_height;
            body.vertical_velocity = 0.0;
            body.is_on_ground = true;
        }
        None => {
            body.position.y = candidate_y;
            body.is_on_ground = false;
        }
    }

    // Fallback floor.
    if body.position.y < settings.standing_height {
        body.position.y = settings.standing_height;
        body.vertical_velocity = 0.0;
        body.is_on_ground = true;
    }
}

/// Launch a jump if grounded with gravity on. Returns whether it fired.
pub fn try_jump(
    settings: &LocomotionSettings,
    toggles: PhysicsToggles,
    body: &mut PlayerKinematics,
) -> bool {
    if !toggles.gravity_enabled || !body.is_on_ground {
        return false;
    }
    body.vertical_velocity = settings.jump_velocity;
    body.is_on_ground = false;
    true
}

/// Advance the horizontal axis by one step: damping, input impulse, then collision-aware
/// commit with per-world-axis sliding.
#[allow(clippy::too_many_arguments)]
pub fn step_horizontal<Q: SceneQuery + ?Sized>(
    scene: &Q,
    settings: &LocomotionSettings,
    toggles: PhysicsToggles,
    intent: &MoveState,
    facing: &Vec3,
    velocity: &mut PlanarVelocity,
    position: &mut Vec3,
    dt: f32,
) {
    let decay = settings.horizontal_damping * dt;
    velocity.forward -= velocity.forward * decay;
    velocity.right -= velocity.right * decay;

    let input = intent.planar_input();
    let speed = settings.planar_speed(intent.sprint);
    velocity.right += input.x * speed;
    velocity.forward += input.y * speed;

    let basis = FacingBasis::from_facing(facing);
    let old = *position;
    let candidate = old + basis.displacement(velocity.forward, velocity.right);

    let is_clear =
        |p: &Vec3| !toggles.collisions_enabled || scene.clearance_probe(p, settings.player_radius);

    if is_clear(&candidate) {
        *position = candidate;
        return;
    }

    // Blocked: try each world axis on its own, starting from the old position.
    let x_only = Vec3::new(candidate.x, old.y, old.z);
    if is_clear(&x_only) {
        position.x = candidate.x;
    }
    let z_only = Vec3::new(old.x, old.y, candidate.z);
    if is_clear(&z_only) {
        position.z = candidate.z;
    }
}

/// One full locomotion frame: vertical axis first, then horizontal.
///
/// Edge-triggered jumps are not read from `intent`; call [`try_jump`] when the command
/// arrives.
#[allow(clippy::too_many_arguments)]
pub fn step_locomotion<Q: SceneQuery + ?Sized>(
    scene: &Q,
    settings: &LocomotionSettings,
    toggles: PhysicsToggles,
    intent: &MoveState,
    facing: &Vec3,
    body: &mut PlayerKinematics,
    velocity: &mut PlanarVelocity,
    dt: f32,
) {
    step_vertical(scene, settings, toggles, intent, body, dt);
    step_horizontal(
        scene,
        settings,
        toggles,
        intent,
        facing,
        velocity,
        &mut body.position,
        dt,
    );
}

/// Owns the first-person body state and forwards to the step functions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionController {
    pub body: PlayerKinematics,
    pub velocity: PlanarVelocity,
}

impl LocomotionController {
    pub fn spawn(position: Vec3) -> Self {
        Self {
            body: PlayerKinematics::at(position),
            velocity: PlanarVelocity::default(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Drop any vertical motion, e.g. when gravity is switched off.
    #[inline]
    pub fn halt_vertical(&mut self) {
        self.body.vertical_velocity = 0.0;
    }

    pub fn jump(&mut self, settings: &LocomotionSettings, toggles: PhysicsToggles) -> bool {
        try_jump(settings, toggles, &mut self.body)
    }

    pub fn step<Q: SceneQuery + ?Sized>(
        &mut self,
        scene: &Q,
        settings: &LocomotionSettings,
        toggles: PhysicsToggles,
        intent: &MoveState,
        facing: &Vec3,
        dt: f32,
    ) {
        step_locomotion(
            scene,
            settings,
            toggles,
            intent,
            facing,
            &mut self.body,
            &mut self.velocity,
            dt,
        );
    }
}
