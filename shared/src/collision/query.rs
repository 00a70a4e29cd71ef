use super::types::{CARDINAL_DIRECTIONS, RayHit, Vec3, down};
use crate::constants::DIRECTION_EPS_SQ;

/// Ray queries against a static set of collidable surfaces.
///
/// Implementors only provide [`SceneQuery::probe`]; the ground and clearance probes are built
/// on top of it. All methods are pure with respect to the scene.
pub trait SceneQuery {
    /// Nearest hit of the ray `origin + t * direction` for `t` in `[0, max_distance]`.
    ///
    /// `direction` does not need to be unit length, but a zero, non-finite or otherwise degenerate
    /// direction (or a non-positive range) yields `None` instead of failing.
    fn probe(&self, origin: &Vec3, direction: &Vec3, max_distance: f32) -> Option<RayHit>;

    /// Downward probe used to find the supporting surface below `position`.
    #[inline]
    fn ground_probe(&self, position: &Vec3, range: f32) -> Option<RayHit> {
        self.probe(position, &down(), range)
    }

    /// Returns true iff none of the four horizontal cardinal rays of length `radius` hits.
    ///
    /// This is a coarse stand-in for a capsule: diagonal corners and obstacles above or below
    /// the probe height are not detected.
    fn clearance_probe(&self, position: &Vec3, radius: f32) -> bool {
        CARDINAL_DIRECTIONS
            .iter()
            .all(|d| self.probe(position, &Vec3::from(*d), radius).is_none())
    }
}

/// Validates and normalizes a probe direction and range.
///
/// Returns `None` for inputs that must be treated as "no hit".
#[inline]
pub(crate) fn sanitize_ray(origin: &Vec3, direction: &Vec3, max_distance: f32) -> Option<Vec3> {
    if !max_distance.is_finite() || max_distance <= 0.0 {
        return None;
    }
    if !origin.iter().all(|c| c.is_finite()) {
        return None;
    }
    let len_sq = direction.norm_squared();
    if !len_sq.is_finite() || len_sq <= DIRECTION_EPS_SQ {
        return None;
    }
    Some(direction / len_sq.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_degenerate_rays() {
        let o = Vec3::zeros();
        assert!(sanitize_ray(&o, &Vec3::zeros(), 1.0).is_none());
        assert!(sanitize_ray(&o, &Vec3::new(f32::NAN, 0.0, 0.0), 1.0).is_none());
        assert!(sanitize_ray(&o, &Vec3::x(), 0.0).is_none());
        assert!(sanitize_ray(&o, &Vec3::x(), f32::INFINITY).is_none());
        assert!(sanitize_ray(&Vec3::new(f32::NAN, 0.0, 0.0), &Vec3::x(), 1.0).is_none());
    }

    #[test]
    fn sanitize_normalizes_without_touching_input() {
        let dir = Vec3::new(0.0, 0.0, -4.0);
        let unit = sanitize_ray(&Vec3::zeros(), &dir, 2.0).expect("valid ray");
        assert!((unit.norm() - 1.0).abs() < 1.0e-6);
        assert_eq!(dir, Vec3::new(0.0, 0.0, -4.0));
    }

    /// Hits an infinite wall at x = `wall_x` for rays pointing +X.
    struct WallAt {
        wall_x: f32,
    }

    impl SceneQuery for WallAt {
        fn probe(&self, origin: &Vec3, direction: &Vec3, max_distance: f32) -> Option<RayHit> {
            let dir = sanitize_ray(origin, direction, max_distance)?;
            if dir.x <= 0.0 {
                return None;
            }
            let t = (self.wall_x - origin.x) / dir.x;
            (t >= 0.0 && t <= max_distance).then(|| RayHit {
                point: origin + dir * t,
                distance: t,
            })
        }
    }

    #[test]
    fn clearance_uses_all_four_cardinal_rays() {
        let scene = WallAt { wall_x: 1.0 };
        assert!(scene.clearance_probe(&Vec3::zeros(), 0.5));
        assert!(!scene.clearance_probe(&Vec3::new(0.6, 0.0, 0.0), 0.5));
        // Ground probe only looks down, so the wall is irrelevant.
        assert!(scene.ground_probe(&Vec3::new(0.9, 5.0, 0.0), 10.0).is_none());
    }
}
