//! Rapier-backed query world for immutable collidable surfaces.
//!
//! The world starts empty and grows as the asset loader registers surfaces. Nothing is ever
//! moved or removed afterwards, so the broad-phase only needs an incremental update per batch.
//!
//! Design goals
//! - Query-focused: no rigid-body simulation, only ray casts against static colliders.
//! - Tolerant: an empty world answers every probe with "no hit" / "clear".
//! - Deterministic: batches are inserted sorted by `SurfaceDef::id`.

use rapier3d::prelude::*;

use super::{
    query::{SceneQuery, sanitize_ray},
    surface::{SurfaceDef, collider_from_def},
    types::{RayHit, SurfaceHandle, Vec3},
};

/// In-memory Rapier structures needed for scene queries against the static surfaces.
///
/// This stores:
/// - `RigidBodySet`/`ColliderSet` (colliders are parentless; the body set stays empty).
/// - `NarrowPhase` and `BroadPhaseBvh` used to create a borrowed `QueryPipeline`.
pub struct CollisionWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
        }
    }

    /// Build a world from a batch of surface definitions.
    ///
    /// Fails on the first invalid definition; nothing is registered in that case.
    pub fn build(defs: impl IntoIterator<Item = SurfaceDef>) -> Result<Self, String> {
        let mut world = Self::new();
        world.register_all(defs)?;
        Ok(world)
    }

    /// Number of registered surfaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    #[inline]
    pub fn contains(&self, handle: SurfaceHandle) -> bool {
        self.colliders.contains(handle.0)
    }

    /// Add a single surface to the collidable set.
    ///
    /// Registering the same geometry twice is allowed; callers are responsible for uniqueness.
    pub fn register(&mut self, def: &SurfaceDef) -> Result<SurfaceHandle, String> {
        let collider =
            collider_from_def(def).map_err(|e| format!("surface {}: {e}", def.id))?;
        let handle = self.colliders.insert(collider);
        self.refresh_broad_phase(&[handle]);

        log::debug!("registered surface {} ({} total)", def.id, self.len());
        Ok(SurfaceHandle(handle))
    }

    /// Add a batch of surfaces, sorted by id for deterministic insertion order.
    ///
    /// All definitions are validated before any is inserted, so an error leaves the world as it
    /// was.
    pub fn register_all(
        &mut self,
        defs: impl IntoIterator<Item = SurfaceDef>,
    ) -> Result<Vec<SurfaceHandle>, String> {
        let mut defs: Vec<SurfaceDef> = defs.into_iter().collect();
        defs.sort_by_key(|d| d.id);

        let colliders = defs
            .iter()
            .map(|def| collider_from_def(def).map_err(|e| format!("surface {}: {e}", def.id)))
            .collect::<Result<Vec<_>, _>>()?;

        let handles: Vec<ColliderHandle> = colliders
            .into_iter()
            .map(|collider| self.colliders.insert(collider))
            .collect();
        self.refresh_broad_phase(&handles);

        log::info!(
            "registered {} surfaces ({} total)",
            handles.len(),
            self.len()
        );
        Ok(handles.into_iter().map(SurfaceHandle).collect())
    }

    /// Insert freshly added colliders into the broad-phase BVH so queries can see them.
    fn refresh_broad_phase(&mut self, modified: &[ColliderHandle]) {
        if modified.is_empty() {
            return;
        }
        let mut events = Vec::new();
        self.broad_phase.update(
            &IntegrationParameters::default(),
            &self.colliders,
            &self.bodies,
            modified,
            &[],
            &mut events,
        );
    }

    /// Create a borrowed `QueryPipeline` view over every registered surface.
    fn query_pipeline(&self) -> QueryPipeline<'_> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::default(),
        )
    }
}

impl SceneQuery for CollisionWorld {
    fn probe(&self, origin: &Vec3, direction: &Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = sanitize_ray(origin, direction, max_distance)?;
        if self.is_empty() {
            return None;
        }

        let ray = Ray::new(Point::from(*origin), dir);
        // Solid casts: an origin inside a shape reports a hit at distance zero.
        let (_handle, toi) = self.query_pipeline().cast_ray(&ray, max_distance, true)?;
        Some(RayHit {
            point: ray.point_at(toi).coords,
            distance: toi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Iso, Quat, SurfaceShape};

    fn ground_plane() -> SurfaceDef {
        SurfaceDef::new(
            0,
            Vec3::zeros(),
            Quat::identity(),
            SurfaceShape::Plane {
                offset_along_normal: 0.0,
            },
        )
    }

    fn cuboid(id: u32, center: Vec3, half_extents: Vec3) -> SurfaceDef {
        SurfaceDef::new(
            id,
            center,
            Quat::identity(),
            SurfaceShape::Cuboid { half_extents },
        )
    }

    #[test]
    fn empty_world_never_hits() {
        let world = CollisionWorld::new();
        let p = Vec3::new(0.0, 1.8, 0.0);
        assert!(world.is_empty());
        assert!(world.probe(&p, &Vec3::new(0.0, -1.0, 0.0), 100.0).is_none());
        assert!(world.ground_probe(&p, 2.0).is_none());
        assert!(world.clearance_probe(&p, 0.5));
    }

    #[test]
    fn ground_probe_reports_plane_height_and_distance() {
        let world = CollisionWorld::build([ground_plane()]).expect("world");
        let hit = world
            .ground_probe(&Vec3::new(3.0, 1.5, -2.0), 2.0)
            .expect("ground below");
        assert!(hit.point.y.abs() < 1.0e-5);
        assert!((hit.point.x - 3.0).abs() < 1.0e-5);
        assert!((hit.distance - 1.5).abs() < 1.0e-5);

        // Out of range.
        assert!(world.ground_probe(&Vec3::new(0.0, 5.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn probe_returns_closest_hit_across_surfaces() {
        let world = CollisionWorld::build([
            cuboid(1, Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 1.0, 0.5)),
            cuboid(2, Vec3::new(0.0, 0.0, -2.0), Vec3::new(1.0, 1.0, 0.5)),
        ])
        .expect("world");

        let hit = world
            .probe(&Vec3::zeros(), &Vec3::new(0.0, 0.0, -1.0), 10.0)
            .expect("hit");
        assert!((hit.distance - 1.5).abs() < 1.0e-4);
        assert!((hit.point.z + 1.5).abs() < 1.0e-4);
    }

    #[test]
    fn probe_normalizes_direction_and_respects_range() {
        let world = CollisionWorld::build([cuboid(
            1,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.5, 0.5, 0.5),
        )])
        .expect("world");

        let hit = world
            .probe(&Vec3::zeros(), &Vec3::new(10.0, 0.0, 0.0), 5.0)
            .expect("hit");
        assert!((hit.distance - 2.5).abs() < 1.0e-4);

        assert!(world.probe(&Vec3::zeros(), &Vec3::x(), 2.0).is_none());
        assert!(world.probe(&Vec3::zeros(), &Vec3::zeros(), 5.0).is_none());
    }

    #[test]
    fn compound_surfaces_test_sub_geometry() {
        let parts = vec![
            (
                Iso::translation(-4.0, 0.0, 0.0),
                SurfaceShape::Cuboid {
                    half_extents: Vec3::new(0.5, 0.5, 0.5),
                },
            ),
            (
                Iso::translation(4.0, 0.0, 0.0),
                SurfaceShape::Sphere { radius: 0.5 },
            ),
        ];
        let world = CollisionWorld::build([SurfaceDef::world_space(
            9,
            SurfaceShape::Compound(parts),
        )])
        .expect("world");

        let east = world.probe(&Vec3::zeros(), &Vec3::x(), 10.0).expect("sphere");
        assert!((east.distance - 3.5).abs() < 1.0e-4);
        let west = world
            .probe(&Vec3::zeros(), &Vec3::new(-1.0, 0.0, 0.0), 10.0)
            .expect("cuboid");
        assert!((west.distance - 3.5).abs() < 1.0e-4);
        assert!(world.probe(&Vec3::zeros(), &Vec3::z(), 10.0).is_none());
    }

    #[test]
    fn triangle_mesh_floor_is_hit_from_above() {
        let floor = SurfaceShape::TriMesh {
            vertices: vec![
                Vec3::new(-5.0, 0.5, -5.0),
                Vec3::new(5.0, 0.5, -5.0),
                Vec3::new(5.0, 0.5, 5.0),
                Vec3::new(-5.0, 0.5, 5.0),
            ],
            indices: vec![[0, 2, 1], [0, 3, 2]],
        };
        let mut world = CollisionWorld::new();
        let handle = world
            .register(&SurfaceDef::world_space(3, floor))
            .expect("mesh");
        assert!(world.contains(handle));
        assert_eq!(world.len(), 1);

        let hit = world
            .ground_probe(&Vec3::new(1.0, 2.0, 1.0), 2.0)
            .expect("floor");
        assert!((hit.point.y - 0.5).abs() < 1.0e-4);
    }

    #[test]
    fn clearance_probe_detects_walls_within_radius() {
        let world = CollisionWorld::build([cuboid(
            1,
            Vec3::new(0.0, 1.0, -1.1),
            Vec3::new(10.0, 2.0, 0.1),
        )])
        .expect("world");

        assert!(world.clearance_probe(&Vec3::new(0.0, 1.8, 0.0), 0.5));
        assert!(!world.clearance_probe(&Vec3::new(0.0, 1.8, -0.6), 0.5));
    }

    #[test]
    fn failed_batch_registers_nothing() {
        let mut world = CollisionWorld::new();
        let bad = SurfaceDef::world_space(2, SurfaceShape::Sphere { radius: 0.0 });
        let err = world.register_all([ground_plane(), bad]).unwrap_err();
        assert!(err.starts_with("surface 2:"));
        assert!(world.is_empty());
    }
}
