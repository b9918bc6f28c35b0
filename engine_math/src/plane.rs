//! Infinite plane `dot(normal, p) + d = 0`.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::bounding_sphere::BoundingSphere;
use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::intersect::{IntersectionType, Intersects};
use crate::ray::Ray;
use crate::scalar::EPSILON;
use crate::text::{parse_components, write_components, ParseError};
use crate::vec3::Vec3;

/// Squared length of `n1 x n2` below which two planes count as parallel.
pub const PLANE_PARALLEL_TOLERANCE: f32 = EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Normalizes `normal` if it is not already unit length. `d` is kept as given.
    pub fn new(normal: Vec3, d: f32) -> Self {
        let normal = if normal.is_normalized() {
            normal
        } else {
            normal.normalize()
        };
        Self { normal, d }
    }

    pub fn from_components(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self::new(Vec3::new(a, b, c), d)
    }

    /// Plane through three points, facing `(p2 - p1) x (p3 - p1)`.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize();
        Self {
            normal,
            d: -normal.dot(p1),
        }
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    pub fn dot_normal(&self, v: Vec3) -> f32 {
        self.normal.dot(v)
    }

    /// Which side of the plane `point` is on.
    pub fn intersect(&self, point: Vec3) -> IntersectionType {
        let dist = self.signed_distance(point);
        if dist.is_nan() {
            IntersectionType::None
        } else if dist > 0.0 {
            IntersectionType::Front
        } else if dist < 0.0 {
            IntersectionType::Back
        } else {
            IntersectionType::Intersect
        }
    }

    /// Rescales normal and distance so the normal has unit length.
    pub fn normalize(&mut self) {
        let len = self.normal.length();
        if len == 0.0 {
            return;
        }
        self.normal = self.normal / len;
        self.d /= len;
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn classify_sphere(&self, sphere: &BoundingSphere) -> IntersectionType {
        let dist = self.signed_distance(sphere.center);
        if dist > sphere.radius {
            IntersectionType::Front
        } else if dist < -sphere.radius {
            IntersectionType::Back
        } else {
            IntersectionType::Intersect
        }
    }

    /// Box corner with the smallest signed distance.
    fn near_corner(&self, bbox: &BoundingBox) -> Vec3 {
        let n = self.normal;
        let pick = |pos: bool, lo: f32, hi: f32| if pos { lo } else { hi };
        Vec3::new(
            pick(n.x >= 0.0, bbox.min.x, bbox.max.x),
            pick(n.y >= 0.0, bbox.min.y, bbox.max.y),
            pick(n.z >= 0.0, bbox.min.z, bbox.max.z),
        )
    }

    /// Box corner with the largest signed distance.
    fn far_corner(&self, bbox: &BoundingBox) -> Vec3 {
        let n = self.normal;
        let pick = |pos: bool, lo: f32, hi: f32| if pos { hi } else { lo };
        Vec3::new(
            pick(n.x >= 0.0, bbox.min.x, bbox.max.x),
            pick(n.y >= 0.0, bbox.min.y, bbox.max.y),
            pick(n.z >= 0.0, bbox.min.z, bbox.max.z),
        )
    }

    /// Tests the box corners nearest to and farthest along the normal.
    pub fn classify_box(&self, bbox: &BoundingBox) -> IntersectionType {
        if self.signed_distance(self.near_corner(bbox)) > 0.0 {
            IntersectionType::Front
        } else if self.signed_distance(self.far_corner(bbox)) < 0.0 {
            IntersectionType::Back
        } else {
            IntersectionType::Intersect
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.d]
    }
}

impl Intersects<BoundingSphere> for Plane {
    type Output = bool;

    /// Half-space test: true unless the sphere lies wholly in front.
    fn intersects(&self, sphere: &BoundingSphere) -> bool {
        self.signed_distance(sphere.center) <= sphere.radius
    }
}

impl Intersects<BoundingBox> for Plane {
    type Output = bool;

    /// Half-space test: true unless the box lies wholly in front.
    fn intersects(&self, bbox: &BoundingBox) -> bool {
        self.signed_distance(self.near_corner(bbox)) <= 0.0
    }
}

impl Intersects<Ray> for Plane {
    type Output = Option<Vec3>;

    fn intersects(&self, ray: &Ray) -> Option<Vec3> {
        ray.intersects(self)
    }
}

impl Intersects<Plane> for Plane {
    type Output = Option<Vec3>;

    /// A point on the line shared by both planes, or `None` when parallel.
    fn intersects(&self, other: &Plane) -> Option<Vec3> {
        let dir = self.normal.cross(other.normal);
        let denom = dir.length_squared();
        if denom < PLANE_PARALLEL_TOLERANCE {
            return None;
        }
        let p = other.normal.cross(dir) * -self.d + dir.cross(self.normal) * -other.d;
        Some(p / denom)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for Plane {
    type Err = ParseError;

    /// Fields are taken as written, like the binary form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [a, b, c, d] = parse_components::<4>(s)?;
        Ok(Self {
            normal: Vec3::new(a, b, c),
            d,
        })
    }
}

impl BinaryCodec for Plane {
    const SIZE_IN_BYTES: usize = 16;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        let [a, b, c, d] = read_f32s::<_, 4>(r)?;
        Ok(Self {
            normal: Vec3::new(a, b, c),
            d,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_classification() {
        let p = Plane::new(Vec3::UP, 0.0);
        assert_eq!(p.intersect(Vec3::new(0.0, 5.0, 0.0)), IntersectionType::Front);
        assert_eq!(p.intersect(Vec3::new(0.0, -5.0, 0.0)), IntersectionType::Back);
        assert_eq!(p.intersect(Vec3::ZERO), IntersectionType::Intersect);
        assert_eq!(
            p.intersect(Vec3::new(f32::NAN, 0.0, 0.0)),
            IntersectionType::None
        );
    }

    #[test]
    fn new_normalizes_normal_only() {
        let p = Plane::new(Vec3::new(0.0, 2.0, 0.0), 4.0);
        assert_eq!(p.normal, Vec3::UP);
        assert_eq!(p.d, 4.0);
    }

    #[test]
    fn normalize_scales_distance() {
        let mut p = Plane {
            normal: Vec3::new(0.0, 2.0, 0.0),
            d: 4.0,
        };
        p.normalize();
        assert_eq!(p.normal, Vec3::UP);
        assert_eq!(p.d, 2.0);
    }

    #[test]
    fn from_points_faces_cross_product() {
        let p = Plane::from_points(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, -1.0),
        );
        assert_eq!(p.normal, Vec3::UP);
        assert_eq!(p.d, -2.0);
        assert_eq!(p.signed_distance(Vec3::new(7.0, 2.0, -3.0)), 0.0);
    }

    #[test]
    fn sphere_and_box_half_space_tests() {
        let ground = Plane::new(Vec3::UP, 0.0);
        let above = BoundingSphere::new(Vec3::new(0.0, 3.0, 0.0), 1.0);
        let big = BoundingSphere::new(Vec3::new(0.0, 3.0, 0.0), 5.0);
        assert_eq!(ground.classify_sphere(&above), IntersectionType::Front);
        assert!(!ground.intersects(&above));
        assert!(ground.intersects(&big));

        let unit = BoundingBox::new(Vec3::splat(-1.0), Vec3::ONE);
        assert!(ground.intersects(&unit));
        let ceiling = Plane::new(Vec3::UP, -5.0);
        assert_eq!(ceiling.classify_box(&unit), IntersectionType::Back);
        assert!(ceiling.intersects(&unit));
    }

    #[test]
    fn volumes_behind_plane_are_inside_half_space() {
        let ground = Plane::new(Vec3::UP, 0.0);
        let sunk = BoundingSphere::new(Vec3::new(0.0, -10.0, 0.0), 1.0);
        assert_eq!(ground.classify_sphere(&sunk), IntersectionType::Back);
        assert!(ground.intersects(&sunk));
        assert!(sunk.intersects(&ground));

        let buried = BoundingBox::new(Vec3::new(-1.0, -12.0, -1.0), Vec3::new(1.0, -10.0, 1.0));
        assert_eq!(ground.classify_box(&buried), IntersectionType::Back);
        assert!(ground.intersects(&buried));
        assert!(buried.intersects(&ground));

        let tilted = Plane::new(Vec3::new(-1.0, -1.0, 0.0), 0.0);
        let front = BoundingBox::new(Vec3::splat(-3.0), Vec3::splat(-2.0));
        assert!(!tilted.intersects(&front));
        assert!(tilted.intersects(&BoundingBox::new(Vec3::splat(2.0), Vec3::splat(3.0))));
    }

    #[test]
    fn text_keeps_fields_as_written() {
        let p: Plane = "0, 2, 0, 4".parse().unwrap();
        assert_eq!(p.normal, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(p.d, 4.0);
        assert_eq!(p.to_string().parse::<Plane>(), Ok(p));
    }

    #[test]
    fn plane_plane_point_lies_on_both() {
        let a = Plane::new(Vec3::UNIT_X, -1.0);
        let b = Plane::new(Vec3::UNIT_Y, -2.0);
        assert_eq!(a.intersects(&b), Some(Vec3::new(1.0, 2.0, 0.0)));

        let c = Plane::from_components(1.0, 1.0, 0.0, -3.0);
        let d = Plane::new(Vec3::UNIT_Z, 4.0);
        let p = c.intersects(&d).unwrap();
        assert!(c.signed_distance(p).abs() < 1e-5);
        assert!(d.signed_distance(p).abs() < 1e-5);
    }

    #[test]
    fn parallel_planes_do_not_meet() {
        let a = Plane::new(Vec3::UP, 0.0);
        let b = Plane::new(Vec3::UP, -3.0);
        assert_eq!(a.intersects(&b), None);
    }

    #[test]
    fn plane_ray_delegates() {
        let ground = Plane::new(Vec3::UP, 0.0);
        let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::DOWN);
        assert_eq!(ground.intersects(&ray), Some(Vec3::new(1.0, 0.0, 0.0)));
    }
}
