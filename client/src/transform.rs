//! Conversions between Bevy (glam) and simulation (nalgebra) math types.

use bevy::prelude::*;
use nalgebra as na;

#[inline]
pub fn to_bevy(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_sim(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}
