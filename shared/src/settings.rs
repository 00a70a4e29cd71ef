/*!
Tunable simulation settings.

Each struct defaults to the values in [`crate::constants`]. Callers that want per-scene tuning
build one of these, adjust fields, and `validate()` it once at start-up.

Notes
- Distances are in meters, angles in radians.
- Horizontal speeds are per frame, vertical speeds and accelerations per second. This mirrors
  how the controller integrates them (see [`crate::movement`]).
*/

use crate::constants::{
    DOOR_ANGULAR_SPEED, DOOR_OPEN_ANGLE, DOOR_SETTLE_EPS, FLY_SPEED_MULTIPLIER, GRAVITY,
    GROUND_PROBE_RANGE, HORIZONTAL_DAMPING, JUMP_VELOCITY, LOOK_MAX_PITCH, LOOK_SENSITIVITY,
    MOVE_SPEED, ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MAX_ELEVATION, ORBIT_MIN_DISTANCE,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SCALE, PLAYER_RADIUS, SPRINT_MULTIPLIER, STANDING_HEIGHT,
};

/// Parameters of the first-person locomotion controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionSettings {
    /// Vertical acceleration (m/s^2), negative is down.
    pub gravity: f32,
    /// Upward speed set by a jump (m/s).
    pub jump_velocity: f32,
    /// Planar impulse per frame while a direction is held.
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    /// Vertical free-fly step is `move_speed * fly_speed_multiplier` per frame.
    pub fly_speed_multiplier: f32,
    /// Eye height above ground; also the absolute floor clamp.
    pub standing_height: f32,
    pub player_radius: f32,
    pub ground_probe_range: f32,
    /// Planar velocity decay rate (1/s).
    pub horizontal_damping: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            move_speed: MOVE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            fly_speed_multiplier: FLY_SPEED_MULTIPLIER,
            standing_height: STANDING_HEIGHT,
            player_radius: PLAYER_RADIUS,
            ground_probe_range: GROUND_PROBE_RANGE,
            horizontal_damping: HORIZONTAL_DAMPING,
        }
    }
}

impl LocomotionSettings {
    /// Checks that every tunable is finite and in a usable range.
    pub fn validate(&self) -> Result<(), &'static str> {
        let all = [
            self.gravity,
            self.jump_velocity,
            self.move_speed,
            self.sprint_multiplier,
            self.fly_speed_multiplier,
            self.standing_height,
            self.player_radius,
            self.ground_probe_range,
            self.horizontal_damping,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err("Locomotion settings contain a non-finite value");
        }
        if self.gravity > 0.0 {
            return Err("Gravity must point down (<= 0)");
        }
        if self.standing_height <= 0.0 {
            return Err("Standing height must be positive");
        }
        if self.player_radius <= 0.0 {
            return Err("Player radius must be positive");
        }
        if self.ground_probe_range < self.standing_height {
            return Err("Ground probe range must reach at least the standing height");
        }
        if self.move_speed < 0.0 || self.sprint_multiplier < 0.0 || self.fly_speed_multiplier < 0.0
        {
            return Err("Speeds and multipliers must be non-negative");
        }
        if self.horizontal_damping < 0.0 || self.jump_velocity < 0.0 {
            return Err("Damping and jump velocity must be non-negative");
        }
        Ok(())
    }

    /// Planar impulse per frame for the current sprint intent.
    #[inline]
    pub fn planar_speed(&self, sprint: bool) -> f32 {
        if sprint {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        }
    }

    /// Vertical free-fly step per frame.
    #[inline]
    pub fn fly_step(&self) -> f32 {
        self.move_speed * self.fly_speed_multiplier
    }
}

/// Door animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorSettings {
    pub open_angle: f32,
    /// Angular step per frame.
    pub angular_speed: f32,
    pub settle_eps: f32,
}

impl Default for DoorSettings {
    fn default() -> Self {
        Self {
            open_angle: DOOR_OPEN_ANGLE,
            angular_speed: DOOR_ANGULAR_SPEED,
            settle_eps: DOOR_SETTLE_EPS,
        }
    }
}

impl DoorSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.open_angle.is_finite() && self.angular_speed.is_finite()) {
            return Err("Door settings contain a non-finite value");
        }
        if self.angular_speed <= 0.0 {
            return Err("Door angular speed must be positive");
        }
        if self.settle_eps < 0.0 {
            return Err("Door settle epsilon must be non-negative");
        }
        Ok(())
    }
}

/// Camera control parameters for both navigation modes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_scale: f32,
    pub max_elevation: f32,
    pub look_sensitivity: f32,
    pub max_pitch: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_scale: ORBIT_ZOOM_SCALE,
            max_elevation: ORBIT_MAX_ELEVATION,
            look_sensitivity: LOOK_SENSITIVITY,
            max_pitch: LOOK_MAX_PITCH,
        }
    }
}

impl OrbitSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.min_distance <= 0.0 || self.max_distance < self.min_distance {
            return Err("Orbit distance limits must satisfy 0 < min <= max");
        }
        if !(0.0..=1.0).contains(&self.damping) || self.damping == 0.0 {
            return Err("Orbit damping must be in (0, 1]");
        }
        if self.zoom_scale <= 0.0 || self.zoom_scale >= 1.0 {
            return Err("Orbit zoom scale must be in (0, 1)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LocomotionSettings::default().validate(), Ok(()));
        assert_eq!(DoorSettings::default().validate(), Ok(()));
        assert_eq!(OrbitSettings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_upward_gravity_and_short_probe() {
        let up = LocomotionSettings {
            gravity: 9.81,
            ..LocomotionSettings::default()
        };
        assert_eq!(up.validate(), Err("Gravity must point down (<= 0)"));

        let short = LocomotionSettings {
            ground_probe_range: 1.0,
            ..LocomotionSettings::default()
        };
        assert_eq!(
            short.validate(),
            Err("Ground probe range must reach at least the standing height")
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let s = LocomotionSettings {
            player_radius: f32::NAN,
            ..LocomotionSettings::default()
        };
        assert!(s.validate().is_err());

        let d = DoorSettings {
            angular_speed: f32::INFINITY,
            ..DoorSettings::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn sprint_scales_planar_speed() {
        let s = LocomotionSettings::default();
        assert_eq!(s.planar_speed(false), s.move_speed);
        assert!((s.planar_speed(true) - s.move_speed * s.sprint_multiplier).abs() < 1.0e-6);
        assert!((s.fly_step() - 0.3).abs() < 1.0e-6);
    }
}
