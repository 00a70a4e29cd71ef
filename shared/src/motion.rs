use nalgebra as na;

// Keep this file focused on "desired translation" math: intent flags in, planar vectors out.
// Collision lives in `movement`.
use crate::{collision::Vec3, constants::DIRECTION_EPS_SQ};

/// Named intent flags, set by the input layer while a key is held.
///
/// The controller only reads this; `jump` is consumed as an edge-triggered command by the
/// caller (see [`crate::movement::try_jump`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
    pub jump: bool,
}

impl MoveState {
    /// Planar input direction as `(right, forward)`, normalized so diagonals are not faster.
    ///
    /// Opposing keys cancel out; no keys (or only cancelling keys) give the zero vector.
    pub fn planar_input(&self) -> na::Vector2<f32> {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        let raw = na::Vector2::new(
            axis(self.right, self.left),
            axis(self.forward, self.backward),
        );
        raw.try_normalize(0.0).unwrap_or_else(na::Vector2::zeros)
    }

    /// Vertical free-fly input: +1 up, -1 down, 0 for none or both.
    pub fn vertical_input(&self) -> f32 {
        f32::from(u8::from(self.up)) - f32::from(u8::from(self.down))
    }
}

/// World-space horizontal basis derived from the camera facing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacingBasis {
    /// Facing flattened to the XZ plane, unit length (or zero when looking straight up/down).
    pub forward: Vec3,
    /// `forward x up`, unit length (or zero).
    pub right: Vec3,
}

impl FacingBasis {
    /// Flatten `facing` onto the horizontal plane and renormalize.
    ///
    /// A vertical or degenerate facing yields a zero basis, which turns movement into a no-op
    /// rather than producing NaNs.
    pub fn from_facing(facing: &Vec3) -> Self {
        let flat = Vec3::new(facing.x, 0.0, facing.z);
        let len_sq = flat.norm_squared();
        if !len_sq.is_finite() || len_sq <= DIRECTION_EPS_SQ {
            return Self {
                forward: Vec3::zeros(),
                right: Vec3::zeros(),
            };
        }
        let forward = flat / len_sq.sqrt();
        let right = forward.cross(&Vec3::y());
        Self { forward, right }
    }

    /// World-space displacement for camera-local planar components.
    #[inline]
    pub fn displacement(&self, forward: f32, right: f32) -> Vec3 {
        self.forward * forward + self.right * right
    }
}

/// Facing vector for yaw/pitch look angles.
///
/// Convention: +X right, +Y up, -Z forward at yaw = 0; positive yaw turns left (counter-clockwise
/// seen from above), positive pitch looks up.
pub fn facing_from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(-sy * cp, sp, -cy * cp)
}

/// Yaw that makes [`facing_from_yaw_pitch`] point along the planar direction `delta`.
///
/// Returns `None` when `delta` has no horizontal extent.
pub fn yaw_towards(delta: &Vec3) -> Option<f32> {
    let xz = na::Vector2::new(delta.x, delta.z);
    if xz.norm_squared() <= DIRECTION_EPS_SQ {
        return None;
    }
    Some((-delta.x).atan2(-delta.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn diagonal_input_is_normalized() {
        let state = MoveState {
            forward: true,
            right: true,
            ..MoveState::default()
        };
        let input = state.planar_input();
        assert!((input.norm() - 1.0).abs() < 1.0e-6);
        assert!((input.x - input.y).abs() < 1.0e-6);
    }

    #[test]
    fn opposing_keys_cancel() {
        let state = MoveState {
            forward: true,
            backward: true,
            ..MoveState::default()
        };
        assert_eq!(state.planar_input(), na::Vector2::zeros());

        let fly = MoveState {
            up: true,
            down: true,
            ..MoveState::default()
        };
        assert_eq!(fly.vertical_input(), 0.0);
    }

    #[test]
    fn basis_flattens_pitched_facing() {
        let basis = FacingBasis::from_facing(&Vec3::new(0.0, -0.8, -0.6));
        assert!((basis.forward - Vec3::new(0.0, 0.0, -1.0)).norm() < 1.0e-6);
        assert!((basis.right - Vec3::new(1.0, 0.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn vertical_facing_gives_zero_basis() {
        let basis = FacingBasis::from_facing(&Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(basis.forward, Vec3::zeros());
        assert_eq!(basis.displacement(1.0, 1.0), Vec3::zeros());
    }

    #[test]
    fn yaw_round_trips_through_facing() {
        let facing = facing_from_yaw_pitch(FRAC_PI_2, 0.0);
        assert!((facing - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1.0e-6);

        let yaw = yaw_towards(&Vec3::new(3.0, 1.0, 3.0)).expect("planar delta");
        let back = facing_from_yaw_pitch(yaw, 0.0);
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!((back - expected).norm() < 1.0e-5);

        assert!(yaw_towards(&Vec3::new(0.0, 5.0, 0.0)).is_none());
    }
}
