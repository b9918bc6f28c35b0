//! Bounding sphere.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::containment::{Containment, Contains};
use crate::intersect::Intersects;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::text::{parse_components, write_components, ParseError};
use crate::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    /// Expected to be non-negative.
    pub radius: f32,
}

impl BoundingSphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere centered between `min` and `max` with half the diagonal as radius.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) * 0.5, ((min - max) * 0.5).length())
    }

    pub fn to_array(&self) -> [f32; 4] {
        let c = self.center;
        [c.x, c.y, c.z, self.radius]
    }

    fn from_array([x, y, z, radius]: [f32; 4]) -> Self {
        Self::new(Vec3::new(x, y, z), radius)
    }
}

impl Contains<Vec3> for BoundingSphere {
    fn contains(&self, p: &Vec3) -> Containment {
        if self.center.distance(*p) - self.radius > 0.0 {
            Containment::None
        } else {
            Containment::Fully
        }
    }
}

impl Contains<BoundingSphere> for BoundingSphere {
    fn contains(&self, other: &BoundingSphere) -> Containment {
        let dist = self.center.distance(other.center);
        if dist > self.radius + other.radius {
            Containment::None
        } else if dist + other.radius <= self.radius {
            Containment::Fully
        } else {
            Containment::Partial
        }
    }
}

impl Contains<BoundingBox> for BoundingSphere {
    /// Closest-point rejection, then every corner is probed against the radius.
    fn contains(&self, bbox: &BoundingBox) -> Containment {
        let r_sq = self.radius * self.radius;
        if bbox.closest_point(self.center).distance_squared(self.center) > r_sq {
            return Containment::None;
        }
        if bbox
            .corners()
            .iter()
            .all(|corner| corner.distance_squared(self.center) <= r_sq)
        {
            Containment::Fully
        } else {
            Containment::Partial
        }
    }
}

impl Intersects<BoundingSphere> for BoundingSphere {
    type Output = bool;

    fn intersects(&self, other: &BoundingSphere) -> bool {
        self.contains(other).overlaps()
    }
}

impl Intersects<BoundingBox> for BoundingSphere {
    type Output = bool;

    fn intersects(&self, bbox: &BoundingBox) -> bool {
        self.contains(bbox).overlaps()
    }
}

impl Intersects<Plane> for BoundingSphere {
    type Output = bool;

    fn intersects(&self, plane: &Plane) -> bool {
        plane.intersects(self)
    }
}

impl Intersects<Ray> for BoundingSphere {
    type Output = bool;

    fn intersects(&self, ray: &Ray) -> bool {
        ray.sphere_entry(self).is_some()
    }
}

/// `cx, cy, cz, r`.
impl fmt::Display for BoundingSphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for BoundingSphere {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<4>(s).map(Self::from_array)
    }
}

impl BinaryCodec for BoundingSphere {
    const SIZE_IN_BYTES: usize = 16;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        read_f32s::<_, 4>(r).map(Self::from_array)
    }
}
