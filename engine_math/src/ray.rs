//! Half-line `position + direction * t`, `t >= 0`.
//!
//! `direction` does not need to be unit length. Distances returned by
//! [`Ray::sphere_entry`] and [`Ray::box_entry`] are in units of `direction`.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::bounding_sphere::BoundingSphere;
use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::intersect::Intersects;
use crate::plane::Plane;
use crate::scalar::EPSILON;
use crate::text::{parse_components, write_components, ParseError};
use crate::vec3::Vec3;

/// Direction components (and `|d1 x d2|`, `dot(n, d)`) below this are treated as parallel.
pub const RAY_PARALLEL_TOLERANCE: f32 = EPSILON;

/// How far behind the origin a plane hit may fall and still count.
pub const RAY_BEHIND_TOLERANCE: f32 = EPSILON;

/// Per-component distance within which two rays are considered to meet.
pub const RAY_MEET_TOLERANCE: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Ray {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
        }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.position + self.direction * t
    }

    /// Distance to where the ray enters `sphere`. `0` when the origin is inside.
    pub fn sphere_entry(&self, sphere: &BoundingSphere) -> Option<f32> {
        let m = self.position - sphere.center;
        let a = self.direction.length_squared();
        let b = m.dot(self.direction);
        let c = m.length_squared() - sphere.radius * sphere.radius;

        if c <= 0.0 {
            return Some(0.0);
        }
        // Outside and pointing away.
        if b > 0.0 || a == 0.0 {
            return None;
        }
        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        Some((-b - disc.sqrt()) / a)
    }

    /// Slab test. Distance to where the ray enters `bbox`, `0` when the origin is inside.
    pub fn box_entry(&self, bbox: &BoundingBox) -> Option<f32> {
        let origin = self.position.to_array();
        let dir = self.direction.to_array();
        let min = bbox.min.to_array();
        let max = bbox.max.to_array();

        let mut t_min = 0.0_f32;
        let mut t_max = f32::MAX;

        for axis in 0..3 {
            if dir[axis].abs() < RAY_PARALLEL_TOLERANCE {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let mut t1 = (min[axis] - origin[axis]) * inv;
            let mut t2 = (max[axis] - origin[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }

    pub fn to_array(&self) -> [f32; 6] {
        let (p, d) = (self.position, self.direction);
        [p.x, p.y, p.z, d.x, d.y, d.z]
    }

    fn from_array([px, py, pz, dx, dy, dz]: [f32; 6]) -> Self {
        Self::new(Vec3::new(px, py, pz), Vec3::new(dx, dy, dz))
    }
}

impl Intersects<BoundingSphere> for Ray {
    type Output = bool;

    fn intersects(&self, sphere: &BoundingSphere) -> bool {
        self.sphere_entry(sphere).is_some()
    }
}

impl Intersects<BoundingBox> for Ray {
    type Output = bool;

    fn intersects(&self, bbox: &BoundingBox) -> bool {
        self.box_entry(bbox).is_some()
    }
}

impl Intersects<Ray> for Ray {
    type Output = Option<Vec3>;

    /// Meeting point of the two supporting lines.
    fn intersects(&self, other: &Ray) -> Option<Vec3> {
        let (p1, d1) = (self.position, self.direction);
        let (p2, d2) = (other.position, other.direction);
        let cross = d1.cross(d2);
        let denom = cross.length_squared();

        if denom.sqrt() < RAY_PARALLEL_TOLERANCE {
            return p1.equal_enough(p2, RAY_MEET_TOLERANCE).then_some(p1);
        }

        // s and t are triple products over |d1 x d2|².
        let diff = p2 - p1;
        let s = diff.dot(d2.cross(cross)) / denom;
        let t = diff.dot(d1.cross(cross)) / denom;
        let on_self = self.point_at(s);
        let on_other = other.point_at(t);

        on_self
            .equal_enough(on_other, RAY_MEET_TOLERANCE)
            .then_some(on_self)
    }
}

impl Intersects<Plane> for Ray {
    type Output = Option<Vec3>;

    fn intersects(&self, plane: &Plane) -> Option<Vec3> {
        let denom = plane.dot_normal(self.direction);
        if denom.abs() < RAY_PARALLEL_TOLERANCE {
            return None;
        }
        let t = -plane.signed_distance(self.position) / denom;
        if t < -RAY_BEHIND_TOLERANCE {
            return None;
        }
        Some(self.point_at(t.max(0.0)))
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for Ray {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<6>(s).map(Self::from_array)
    }
}

impl BinaryCodec for Ray {
    const SIZE_IN_BYTES: usize = 24;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        read_f32s::<_, 6>(r).map(Self::from_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::splat(-1.0), Vec3::ONE)
    }

    #[test]
    fn box_hit_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::UNIT_Z);
        assert!(ray.intersects(&unit_box()));
        assert_eq!(ray.box_entry(&unit_box()), Some(4.0));
    }

    #[test]
    fn box_behind_or_beside_misses() {
        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::UNIT_Z);
        assert!(!away.intersects(&unit_box()));

        // Axis-parallel direction with the origin outside that slab.
        let beside = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::UNIT_Z);
        assert!(!beside.intersects(&unit_box()));
    }

    #[test]
    fn box_origin_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(ray.box_entry(&unit_box()), Some(0.0));
    }

    #[test]
    fn sphere_entry_distance() {
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::UNIT_Z);
        assert_eq!(ray.sphere_entry(&sphere), Some(4.0));

        let scaled = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(scaled.sphere_entry(&sphere), Some(2.0));

        let inside = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::UNIT_X);
        assert_eq!(inside.sphere_entry(&sphere), Some(0.0));
    }

    #[test]
    fn sphere_misses() {
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::UNIT_Z);
        assert!(!away.intersects(&sphere));
        let wide = Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::UNIT_Z);
        assert!(!wide.intersects(&sphere));
    }

    #[test]
    fn crossing_rays_meet() {
        let a = Ray::new(Vec3::ZERO, Vec3::UNIT_X);
        let b = Ray::new(Vec3::new(2.0, -1.0, 0.0), Vec3::UNIT_Y);
        assert_eq!(a.intersects(&b), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn skew_rays_miss() {
        let a = Ray::new(Vec3::ZERO, Vec3::UNIT_X);
        let b = Ray::new(Vec3::new(2.0, -1.0, 1.0), Vec3::UNIT_Y);
        assert_eq!(a.intersects(&b), None);
    }

    #[test]
    fn parallel_rays_meet_only_at_shared_origin() {
        let a = Ray::new(Vec3::ONE, Vec3::UNIT_X);
        let same = Ray::new(Vec3::ONE, Vec3::new(2.0, 0.0, 0.0));
        let offset = Ray::new(Vec3::ZERO, Vec3::UNIT_X);
        assert_eq!(a.intersects(&same), Some(Vec3::ONE));
        assert_eq!(a.intersects(&offset), None);
    }

    #[test]
    fn plane_hit_parallel_and_behind() {
        let ground = Plane::new(Vec3::UP, 0.0);
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::DOWN);
        assert_eq!(down.intersects(&ground), Some(Vec3::ZERO));

        let flat = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::UNIT_X);
        assert_eq!(flat.intersects(&ground), None);

        let up = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::UP);
        assert_eq!(up.intersects(&ground), None);

        let on = Ray::new(Vec3::ZERO, Vec3::UP);
        assert_eq!(on.intersects(&ground), Some(Vec3::ZERO));
    }
}
