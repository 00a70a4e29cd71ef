//! Scene-level helpers used while loading a model: bounds, collidable filtering, door lookup.

use crate::collision::Vec3;

/// Axis-aligned bounding box of a loaded model (world space).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SceneBounds {
    /// Smallest box containing every finite point. `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        points
            .into_iter()
            .filter(|p| p.iter().all(|c| c.is_finite()))
            .fold(None, |acc: Option<Self>, p| {
                Some(match acc {
                    None => Self { min: *p, max: *p },
                    Some(b) => Self {
                        min: b.min.inf(p),
                        max: b.max.sup(p),
                    },
                })
            })
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.size().max()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    #[inline]
    pub fn translated(&self, offset: &Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Translation that centers the box on X/Z and rests its lowest point on y = 0.
    #[inline]
    pub fn grounding_offset(&self) -> Vec3 {
        let c = self.center();
        Vec3::new(-c.x, -self.min.y, -c.z)
    }
}

/// A mesh takes part in collisions iff at least one of its extents exceeds `min_size`.
#[inline]
pub fn is_collidable_extent(size: &Vec3, min_size: f32) -> bool {
    size.iter().any(|s| *s > min_size)
}

/// Door meshes are recognized by name.
pub fn is_door_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("door") || lower.contains("folding")
}
