use rapier3d::prelude::*;

use super::types::{Iso, Quat, Vec3};

/// Canonical, engine-agnostic definition of an immutable collidable surface.
///
/// The asset loader maps whatever it loaded (meshes, the ground plane) to this type, then
/// registers it with [`super::CollisionWorld::register`].
#[derive(Clone, Debug)]
pub struct SurfaceDef {
    /// Caller-chosen identifier, used for logging and deterministic batch ordering.
    pub id: u32,
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation (unit quaternion).
    pub rotation: Quat,
    /// Collider shape parameters.
    pub shape: SurfaceShape,
}

impl SurfaceDef {
    #[inline]
    pub fn new(id: u32, translation: Vec3, rotation: Quat, shape: SurfaceShape) -> Self {
        Self {
            id,
            translation,
            rotation,
            shape,
        }
    }

    /// A surface whose geometry is already expressed in world space.
    #[inline]
    pub fn world_space(id: u32, shape: SurfaceShape) -> Self {
        Self::new(id, Vec3::zeros(), Quat::identity(), shape)
    }

    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(self.translation.into(), self.rotation)
    }
}

/// Supported surface shapes.
#[derive(Clone, Debug)]
pub enum SurfaceShape {
    /// Infinite plane (half-space).
    ///
    /// The plane normal is derived from the pose as `rotation * +Y` and the plane passes through
    /// `translation + normal * offset_along_normal`. Everything below the plane is solid.
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vec3 },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Indexed triangle soup in the surface's local space, e.g. a loaded render mesh.
    TriMesh {
        vertices: Vec<Vec3>,
        indices: Vec<[u32; 3]>,
    },

    /// Aggregate of sub-shapes, each with a pose relative to the surface.
    ///
    /// Probes test every part and report only the closest hit.
    Compound(Vec<(Iso, SurfaceShape)>),
}

impl SurfaceShape {
    /// Rapier shape for this definition, in surface-local space.
    pub fn to_shared_shape(&self) -> Result<SharedShape, String> {
        match self {
            // The offset lives on the collider pose, see `collider_from_def`.
            SurfaceShape::Plane { .. } => Ok(SharedShape::halfspace(Vector::y_axis())),
            SurfaceShape::Cuboid { half_extents } => {
                if half_extents.iter().any(|h| !h.is_finite() || *h <= 0.0) {
                    return Err(format!("invalid cuboid half extents {half_extents:?}"));
                }
                Ok(SharedShape::cuboid(
                    half_extents.x,
                    half_extents.y,
                    half_extents.z,
                ))
            }
            SurfaceShape::Sphere { radius } => {
                positive("sphere radius", *radius)?;
                Ok(SharedShape::ball(*radius))
            }
            SurfaceShape::TriMesh { vertices, indices } => {
                if indices.is_empty() {
                    return Err("triangle mesh has no triangles".to_string());
                }
                let vertex_count = vertices.len() as u32;
                if let Some(bad) = indices.iter().flatten().find(|&&i| i >= vertex_count) {
                    return Err(format!(
                        "triangle index {bad} out of range for {vertex_count} vertices"
                    ));
                }
                let points = vertices.iter().map(|v| Point::from(*v)).collect();
                SharedShape::trimesh(points, indices.clone())
                    .map_err(|e| format!("triangle mesh rejected: {e:?}"))
            }
            SurfaceShape::Compound(parts) => {
                if parts.is_empty() {
                    return Err("compound surface has no parts".to_string());
                }
                let mut shapes = Vec::with_capacity(parts.len());
                for (iso, part) in parts {
                    if matches!(part, SurfaceShape::Plane { .. }) {
                        return Err("planes cannot be part of a compound surface".to_string());
                    }
                    shapes.push((*iso, part.to_shared_shape()?));
                }
                Ok(SharedShape::compound(shapes))
            }
        }
    }
}

fn positive(what: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{what} must be positive, got {value}"))
    }
}

/// Build a parentless Rapier collider placed at the surface's world pose.
pub fn collider_from_def(def: &SurfaceDef) -> Result<Collider, String> {
    let shape = def.shape.to_shared_shape()?;
    let mut iso = def.iso();

    if let SurfaceShape::Plane {
        offset_along_normal,
    } = def.shape
    {
        // Shift the half-space along its world normal: n = R * +Y.
        let n = def.rotation * Vector::y();
        iso.translation.vector += n * offset_along_normal;
    }

    Ok(ColliderBuilder::new(shape).position(iso).build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_primitives() {
        let flat = SurfaceShape::Cuboid {
            half_extents: Vec3::new(1.0, 0.0, 1.0),
        };
        assert!(flat.to_shared_shape().is_err());

        let ball = SurfaceShape::Sphere { radius: -1.0 };
        assert!(ball.to_shared_shape().is_err());

        let ball = SurfaceShape::Sphere { radius: f32::NAN };
        assert!(ball.to_shared_shape().is_err());
    }

    #[test]
    fn rejects_out_of_range_triangle_indices() {
        let mesh = SurfaceShape::TriMesh {
            vertices: vec![Vec3::zeros(), Vec3::x(), Vec3::z()],
            indices: vec![[0, 1, 3]],
        };
        let err = mesh.to_shared_shape().err();
        assert_eq!(
            err.as_deref(),
            Some("triangle index 3 out of range for 3 vertices")
        );
    }

    #[test]
    fn rejects_empty_or_planar_compounds() {
        assert!(SurfaceShape::Compound(vec![]).to_shared_shape().is_err());

        let with_plane = SurfaceShape::Compound(vec![(
            Iso::identity(),
            SurfaceShape::Plane {
                offset_along_normal: 0.0,
            },
        )]);
        assert!(with_plane.to_shared_shape().is_err());
    }

    #[test]
    fn plane_offset_moves_collider_along_normal() {
        let def = SurfaceDef::new(
            7,
            Vec3::new(0.0, 1.0, 0.0),
            Quat::identity(),
            SurfaceShape::Plane {
                offset_along_normal: 0.5,
            },
        );
        let collider = collider_from_def(&def).expect("plane collider");
        let y = collider.position().translation.vector.y;
        assert!((y - 1.5).abs() < 1.0e-6);
    }
}
