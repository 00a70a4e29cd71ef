/*!
Navigation modes and camera control.

The viewer is always in exactly one mode:
- third person: an orbit camera around the model, with damped rotation and clamped zoom;
- first person: the locomotion controller plus yaw/pitch look angles.

`Navigator` owns the mode together with the session toggles, and exposes the transitions
triggered by user commands. The renderer only ever reads `camera_pose()`.
*/

use crate::{
    collision::{SceneQuery, Vec3},
    constants::FIRST_PERSON_SPAWN_OFFSET,
    motion::{MoveState, facing_from_yaw_pitch, yaw_towards},
    movement::{LocomotionController, PhysicsToggles},
    scene::SceneBounds,
    settings::{LocomotionSettings, OrbitSettings},
};

/// Third-person camera placement when no model is loaded.
const DEFAULT_ORBIT_EYE: [f32; 3] = [20.0, 15.0, 20.0];

/// Eye offset direction (scaled by the framing distance) used to frame a loaded model.
const FRAMING_DIRECTION: [f32; 3] = [0.7, 0.5, 0.7];

/// Eye point and look-at target for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Orbit camera around a target point.
///
/// Angles: `yaw` is measured around +Y from +Z toward +X, `elevation` above the horizon.
/// Drag input accumulates into a pending rotation that is bled off by the damping factor on
/// every `update`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub elevation: f32,
    pub distance: f32,
    pending_yaw: f32,
    pending_elevation: f32,
}

impl OrbitCamera {
    /// Orbit that places the eye at `eye` (after clamping) while looking at `target`.
    pub fn looking_from(eye: Vec3, target: Vec3, settings: &OrbitSettings) -> Self {
        let offset = eye - target;
        let raw_distance = offset.norm();
        let (yaw, elevation) = if raw_distance > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / raw_distance).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            target,
            yaw,
            elevation: elevation.clamp(0.0, settings.max_elevation),
            distance: raw_distance.clamp(settings.min_distance, settings.max_distance),
            pending_yaw: 0.0,
            pending_elevation: 0.0,
        }
    }

    /// Queue a rotation from a pointer drag (pixels).
    pub fn drag(&mut self, dx: f32, dy: f32, settings: &OrbitSettings) {
        self.pending_yaw -= dx * settings.rotate_speed;
        self.pending_elevation += dy * settings.rotate_speed;
    }

    /// Zoom by `steps` scroll units; positive steps move closer.
    pub fn zoom(&mut self, steps: f32, settings: &OrbitSettings) {
        if !steps.is_finite() {
            return;
        }
        self.distance = (self.distance * settings.zoom_scale.powf(steps))
            .clamp(settings.min_distance, settings.max_distance);
    }

    /// Apply one frame of the damped rotation and re-clamp.
    pub fn update(&mut self, settings: &OrbitSettings) {
        self.yaw += self.pending_yaw * settings.damping;
        self.elevation = (self.elevation + self.pending_elevation * settings.damping)
            .clamp(0.0, settings.max_elevation);

        let keep = 1.0 - settings.damping;
        self.pending_yaw *= keep;
        self.pending_elevation *= keep;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.target + Vec3::new(ce * sy, se, ce * cy) * self.distance
    }
}

/// First-person view direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Turn by a mouse delta (pixels); pitch stays strictly inside straight up/down.
    pub fn apply_mouse(&mut self, dx: f32, dy: f32, settings: &OrbitSettings) {
        self.yaw -= dx * settings.look_sensitivity;
        self.pitch = (self.pitch - dy * settings.look_sensitivity)
            .clamp(-settings.max_pitch, settings.max_pitch);
    }

    #[inline]
    pub fn facing(&self) -> Vec3 {
        facing_from_yaw_pitch(self.yaw, self.pitch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirstPersonState {
    pub controller: LocomotionController,
    pub look: LookAngles,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigationMode {
    ThirdPerson(OrbitCamera),
    FirstPerson(FirstPersonState),
}

/// Owner of the navigation mode and session toggles.
#[derive(Clone, Debug)]
pub struct Navigator {
    mode: NavigationMode,
    toggles: PhysicsToggles,
    locomotion: LocomotionSettings,
    orbit: OrbitSettings,
    bounds: Option<SceneBounds>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(LocomotionSettings::default(), OrbitSettings::default())
    }
}

impl Navigator {
    /// Starts in third person with no model loaded.
    pub fn new(locomotion: LocomotionSettings, orbit: OrbitSettings) -> Self {
        let mode = NavigationMode::ThirdPerson(Self::framing_orbit(None, &orbit));
        Self {
            mode,
            toggles: PhysicsToggles::default(),
            locomotion,
            orbit,
            bounds: None,
        }
    }

    /// Checks both the locomotion and camera settings.
    pub fn validate(&self) -> Result<(), &'static str> {
        self.locomotion.validate()?;
        self.orbit.validate()
    }

    #[inline]
    pub fn toggles(&self) -> PhysicsToggles {
        self.toggles
    }

    #[inline]
    pub fn is_first_person(&self) -> bool {
        matches!(self.mode, NavigationMode::FirstPerson(_))
    }

    pub fn first_person(&self) -> Option<&FirstPersonState> {
        match &self.mode {
            NavigationMode::FirstPerson(fp) => Some(fp),
            NavigationMode::ThirdPerson(_) => None,
        }
    }

    /// Short label for the current mode, for HUD display.
    pub fn view_label(&self) -> &'static str {
        match self.mode {
            NavigationMode::ThirdPerson(_) => "Third Person",
            NavigationMode::FirstPerson(_) => "First Person",
        }
    }

    /// Record the (already grounded) model bounds and frame them in third person.
    pub fn load_scene(&mut self, bounds: Option<SceneBounds>) {
        self.bounds = bounds;
        self.enter_third_person();
    }

    pub fn enter_third_person(&mut self) {
        let orbit = Self::framing_orbit(self.bounds.as_ref(), &self.orbit);
        self.mode = NavigationMode::ThirdPerson(orbit);
        log::info!("entered third person view");
    }

    /// Spawn beside the model facing its center, at rest.
    pub fn enter_first_person(&mut self) {
        let (spawn, center) = match &self.bounds {
            Some(b) => {
                let c = b.center();
                (
                    Vec3::new(
                        c.x + FIRST_PERSON_SPAWN_OFFSET,
                        self.locomotion.standing_height,
                        c.z + FIRST_PERSON_SPAWN_OFFSET,
                    ),
                    c,
                )
            }
            None => (
                Vec3::new(
                    0.0,
                    self.locomotion.standing_height,
                    FIRST_PERSON_SPAWN_OFFSET,
                ),
                Vec3::zeros(),
            ),
        };
        let look = LookAngles {
            yaw: yaw_towards(&(center - spawn)).unwrap_or(0.0),
            pitch: 0.0,
        };
        self.mode = NavigationMode::FirstPerson(FirstPersonState {
            controller: LocomotionController::spawn(spawn),
            look,
        });
        log::info!(
            "entered first person view at ({:.1}, {:.1}, {:.1})",
            spawn.x,
            spawn.y,
            spawn.z
        );
    }

    /// Re-enter the current mode from scratch.
    pub fn reset(&mut self) {
        if self.is_first_person() {
            self.enter_first_person();
        } else {
            self.enter_third_person();
        }
    }

    /// Returns the new state. Disabling gravity also stops any vertical motion.
    pub fn toggle_gravity(&mut self) -> bool {
        self.toggles.gravity_enabled = !self.toggles.gravity_enabled;
        if let NavigationMode::FirstPerson(fp) = &mut self.mode {
            if !self.toggles.gravity_enabled {
                fp.controller.halt_vertical();
            }
        }
        log::info!("gravity {}", on_off(self.toggles.gravity_enabled));
        self.toggles.gravity_enabled
    }

    /// Returns the new state.
    pub fn toggle_collisions(&mut self) -> bool {
        self.toggles.collisions_enabled = !self.toggles.collisions_enabled;
        log::info!("collisions {}", on_off(self.toggles.collisions_enabled));
        self.toggles.collisions_enabled
    }

    /// Jump in first person. Returns whether it fired.
    pub fn jump(&mut self) -> bool {
        match &mut self.mode {
            NavigationMode::FirstPerson(fp) => fp.controller.jump(&self.locomotion, self.toggles),
            NavigationMode::ThirdPerson(_) => false,
        }
    }

    /// Mouse motion: look around in first person, orbit in third person.
    pub fn pointer_motion(&mut self, dx: f32, dy: f32) {
        match &mut self.mode {
            NavigationMode::FirstPerson(fp) => fp.look.apply_mouse(dx, dy, &self.orbit),
            NavigationMode::ThirdPerson(orbit) => orbit.drag(dx, dy, &self.orbit),
        }
    }

    /// Scroll zoom, third person only.
    pub fn zoom(&mut self, steps: f32) {
        if let NavigationMode::ThirdPerson(orbit) = &mut self.mode {
            orbit.zoom(steps, &self.orbit);
        }
    }

    /// Advance one frame.
    ///
    /// The first-person body only moves while `controls_engaged` (pointer captured); the orbit
    /// camera always settles its damped rotation.
    pub fn step<Q: SceneQuery + ?Sized>(
        &mut self,
        scene: &Q,
        intent: &MoveState,
        controls_engaged: bool,
        dt: f32,
    ) {
        match &mut self.mode {
            NavigationMode::ThirdPerson(orbit) => orbit.update(&self.orbit),
            NavigationMode::FirstPerson(fp) if controls_engaged => {
                let facing = fp.look.facing();
                fp.controller
                    .step(scene, &self.locomotion, self.toggles, intent, &facing, dt);
            }
            NavigationMode::FirstPerson(_) => {}
        }
    }

    pub fn camera_pose(&self) -> CameraPose {
        match &self.mode {
            NavigationMode::ThirdPerson(orbit) => CameraPose {
                eye: orbit.eye(),
                target: orbit.target,
            },
            NavigationMode::FirstPerson(fp) => {
                let eye = fp.controller.position();
                CameraPose {
                    eye,
                    target: eye + fp.look.facing(),
                }
            }
        }
    }

    fn framing_orbit(bounds: Option<&SceneBounds>, settings: &OrbitSettings) -> OrbitCamera {
        match bounds {
            Some(b) => {
                let center = b.center();
                let distance = b.max_dimension() * 2.0;
                let eye = center + Vec3::from(FRAMING_DIRECTION) * distance;
                OrbitCamera::looking_from(eye, center, settings)
            }
            None => {
                OrbitCamera::looking_from(Vec3::from(DEFAULT_ORBIT_EYE), Vec3::zeros(), settings)
            }
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collision::CollisionWorld, constants::NOMINAL_DT};

    fn house_bounds() -> SceneBounds {
        SceneBounds {
            min: Vec3::new(-5.0, 0.0, -4.0),
            max: Vec3::new(5.0, 6.0, 4.0),
        }
    }

    #[test]
    fn starts_in_default_third_person_frame() {
        let nav = Navigator::default();
        assert_eq!(nav.validate(), Ok(()));
        assert!(!nav.is_first_person());
        let pose = nav.camera_pose();
        assert!((pose.eye - Vec3::new(20.0, 15.0, 20.0)).norm() < 1.0e-3);
        assert_eq!(pose.target, Vec3::zeros());
    }

    #[test]
    fn third_person_frames_loaded_model() {
        let mut nav = Navigator::default();
        nav.load_scene(Some(house_bounds()));
        let pose = nav.camera_pose();
        // max dimension 10 -> distance 20
        let expected = Vec3::new(0.0, 3.0, 0.0) + Vec3::new(14.0, 10.0, 14.0);
        assert!((pose.eye - expected).norm() < 1.0e-3);
        assert_eq!(pose.target, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn first_person_spawns_beside_model_facing_center() {
        let mut nav = Navigator::default();
        nav.load_scene(Some(house_bounds()));
        nav.enter_first_person();

        let fp = nav.first_person().expect("first person");
        let p = fp.controller.position();
        assert_eq!(p, Vec3::new(10.0, 1.8, 10.0));
        assert_eq!(fp.controller.body.vertical_velocity, 0.0);

        let facing = fp.look.facing();
        let expected = Vec3::new(-1.0, 0.0, -1.0).normalize();
        assert!((facing - expected).norm() < 1.0e-5);
    }

    #[test]
    fn first_person_without_model_spawns_at_default() {
        let mut nav = Navigator::default();
        nav.enter_first_person();
        let pose = nav.camera_pose();
        assert_eq!(pose.eye, Vec3::new(0.0, 1.8, 10.0));
        assert!((pose.target - Vec3::new(0.0, 1.8, 9.0)).norm() < 1.0e-5);
    }

    #[test]
    fn mode_round_trip_resets_vertical_velocity() {
        let mut nav = Navigator::default();
        let world = CollisionWorld::new();
        nav.enter_first_person();
        // Land on the floor clamp, then jump.
        nav.step(&world, &MoveState::default(), true, NOMINAL_DT);
        assert!(nav.jump());
        assert!(nav.first_person().expect("fp").controller.body.vertical_velocity > 0.0);

        nav.enter_third_person();
        assert!(!nav.jump());
        nav.enter_first_person();
        let body = nav.first_person().expect("fp").controller.body;
        assert_eq!(body.vertical_velocity, 0.0);
    }

    #[test]
    fn disabling_gravity_stops_vertical_motion() {
        let mut nav = Navigator::default();
        let world = CollisionWorld::new();
        nav.enter_first_person();
        nav.step(&world, &MoveState::default(), true, NOMINAL_DT);
        assert!(nav.jump());

        assert!(!nav.toggle_gravity());
        let body = nav.first_person().expect("fp").controller.body;
        assert_eq!(body.vertical_velocity, 0.0);

        // Toggles survive mode switches.
        assert!(!nav.toggle_collisions());
        nav.enter_third_person();
        nav.reset();
        assert!(!nav.toggles().gravity_enabled);
        assert!(!nav.toggles().collisions_enabled);
    }

    #[test]
    fn body_is_frozen_while_controls_are_released() {
        let mut nav = Navigator::default();
        let world = CollisionWorld::new();
        nav.enter_first_person();
        let before = nav.camera_pose();
        let walk = MoveState {
            forward: true,
            ..MoveState::default()
        };
        nav.step(&world, &walk, false, NOMINAL_DT);
        assert_eq!(nav.camera_pose(), before);

        nav.step(&world, &walk, true, NOMINAL_DT);
        assert!(nav.camera_pose().eye.z < before.eye.z);
    }

    #[test]
    fn orbit_zoom_is_clamped() {
        let settings = OrbitSettings::default();
        let mut orbit =
            OrbitCamera::looking_from(Vec3::new(0.0, 0.0, 20.0), Vec3::zeros(), &settings);
        orbit.zoom(1000.0, &settings);
        assert_eq!(orbit.distance, settings.min_distance);
        orbit.zoom(-1000.0, &settings);
        assert_eq!(orbit.distance, settings.max_distance);
    }

    #[test]
    fn orbit_rotation_is_damped_and_stays_above_horizon() {
        let settings = OrbitSettings::default();
        let mut orbit =
            OrbitCamera::looking_from(Vec3::new(0.0, 10.0, 10.0), Vec3::zeros(), &settings);
        let yaw0 = orbit.yaw;

        orbit.drag(-100.0, 0.0, &settings);
        orbit.update(&settings);
        let full = 100.0 * settings.rotate_speed;
        assert!((orbit.yaw - yaw0 - full * settings.damping).abs() < 1.0e-6);

        // Drag hard toward the horizon: the eye must never dip below the target.
        orbit.drag(0.0, -10_000.0, &settings);
        for _ in 0..200 {
            orbit.update(&settings);
            assert!(orbit.elevation >= 0.0);
            assert!(orbit.eye().y >= orbit.target.y);
        }
    }

    #[test]
    fn look_pitch_is_clamped() {
        let settings = OrbitSettings::default();
        let mut look = LookAngles::default();
        look.apply_mouse(0.0, -100_000.0, &settings);
        assert_eq!(look.pitch, settings.max_pitch);
        look.apply_mouse(0.0, 100_000.0, &settings);
        assert_eq!(look.pitch, -settings.max_pitch);
        assert!(look.facing().iter().all(|c| c.is_finite()));
    }
}
