//! Two-state door with a fixed-rate swing animation.

use crate::settings::DoorSettings;

/// Door open/closed flag plus its current swing angle around local Y (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DoorState {
    pub is_open: bool,
    pub current_angle: f32,
}

impl DoorState {
    /// Flip between opening and closing. The angle follows on later steps.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        log::info!(
            "door {}",
            if self.is_open { "opening" } else { "closing" }
        );
    }

    #[inline]
    pub fn target_angle(&self, settings: &DoorSettings) -> f32 {
        if self.is_open {
            settings.open_angle
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_settled(&self, settings: &DoorSettings) -> bool {
        (self.current_angle - self.target_angle(settings)).abs() <= settings.settle_eps
    }

    /// Move the angle one fixed step toward the target, never past it.
    ///
    /// Once within `settle_eps` the angle snaps onto the target and stays there.
    /// Returns true if the angle changed.
    pub fn step(&mut self, settings: &DoorSettings) -> bool {
        let target = self.target_angle(settings);
        if self.current_angle == target {
            return false;
        }
        if self.is_settled(settings) {
            self.current_angle = target;
            return true;
        }

        self.current_angle = if self.current_angle < target {
            (self.current_angle + settings.angular_speed).min(target)
        } else {
            (self.current_angle - settings.angular_speed).max(target)
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_is_monotonic_and_holds() {
        let settings = DoorSettings::default();
        let mut door = DoorState::default();
        door.toggle();

        let mut last = door.current_angle;
        for _ in 0..100 {
            door.step(&settings);
            assert!(door.current_angle >= last);
            assert!(door.current_angle <= settings.open_angle);
            last = door.current_angle;
        }
        assert_eq!(door.current_angle, settings.open_angle);
        assert!(!door.step(&settings));
    }

    #[test]
    fn closing_is_monotonic_down_to_zero() {
        let settings = DoorSettings::default();
        let mut door = DoorState {
            is_open: true,
            current_angle: settings.open_angle,
        };
        door.toggle();

        let mut last = door.current_angle;
        for _ in 0..100 {
            door.step(&settings);
            assert!(door.current_angle <= last);
            assert!(door.current_angle >= 0.0);
            last = door.current_angle;
        }
        assert_eq!(door.current_angle, 0.0);
    }

    #[test]
    fn reversing_mid_swing_turns_back() {
        let settings = DoorSettings::default();
        let mut door = DoorState::default();
        door.toggle();
        for _ in 0..10 {
            door.step(&settings);
        }
        let mid = door.current_angle;
        assert!(mid > 0.0 && mid < settings.open_angle);

        door.toggle();
        door.step(&settings);
        assert!(door.current_angle < mid);
    }

    #[test]
    fn idle_closed_door_never_moves() {
        let settings = DoorSettings::default();
        let mut door = DoorState::default();
        assert!(!door.step(&settings));
        assert_eq!(door.current_angle, 0.0);
    }
}
