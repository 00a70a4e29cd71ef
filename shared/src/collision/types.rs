/*!
Core collision types and math aliases shared by the collision submodules.

This module contains no algorithms. It defines the data exchanged between:
- surface definitions (what the asset loader hands over)
- the Rapier query world (where surfaces live)
- scene queries (ray probes consumed by the locomotion controller)
*/

use nalgebra as na;
use rapier3d::prelude::ColliderHandle;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World-space down direction used by ground probes.
#[inline]
pub fn down() -> Vec3 {
    Vec3::new(0.0, -1.0, 0.0)
}

/// Horizontal directions swept by the clearance probe: +X, -X, +Z, -Z.
pub const CARDINAL_DIRECTIONS: [[f32; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

/// Nearest intersection of a ray with the collidable set.
///
/// Absence of a hit is expressed as `Option::None`, never as a zero distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space impact point.
    pub point: Vec3,
    /// Distance from the ray origin along the (unit) direction.
    pub distance: f32,
}

/// Opaque handle to a surface registered in a [`super::CollisionWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub(crate) ColliderHandle);
