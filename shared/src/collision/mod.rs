/*!
Collision root module.

This module implements the collision query service used by the locomotion controller: a set
of static surfaces registered once at scene-load time, queried with bounded ray probes.
The code is split for clarity:

- types:   shared data types (RayHit, SurfaceHandle, math aliases)
- surface: surface definitions and their conversion to Rapier colliders
- query:   the `SceneQuery` trait with ground and clearance probes
- world:   `CollisionWorld`, the Rapier-backed `SceneQuery`
*/

pub mod query;
pub mod surface;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use query::SceneQuery;
pub use surface::{SurfaceDef, SurfaceShape, collider_from_def};
pub use types::{Iso, Quat, RayHit, SurfaceHandle, Vec3};
pub use world::CollisionWorld;

/// Convenience: a ground slab whose top face lies at `top_y`, centered on the origin.
///
/// Unlike a plane, the slab ends at its half extents, so probes outside of it find nothing.
#[inline]
pub fn ground_slab(id: u32, half_size_xz: f32, top_y: f32, thickness: f32) -> SurfaceDef {
    let half_thickness = thickness * 0.5;
    SurfaceDef::new(
        id,
        Vec3::new(0.0, top_y - half_thickness, 0.0),
        Quat::identity(),
        SurfaceShape::Cuboid {
            half_extents: Vec3::new(half_size_xz, half_thickness, half_size_xz),
        },
    )
}
