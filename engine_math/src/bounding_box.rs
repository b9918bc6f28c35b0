//! Axis-aligned bounding box.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounding_sphere::BoundingSphere;
use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::containment::{Containment, Contains};
use crate::intersect::Intersects;
use crate::mat4::Mat4;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::scalar::EPSILON;
use crate::text::{parse_components, write_components, ParseError};
use crate::vec3::Vec3;

/// Box spanning `min..=max`. `min <= max` per axis is expected, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub const CORNER_COUNT: usize = 8;

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`, or `None` for an empty slice.
    ///
    /// Flat axes are widened on each side so the box keeps a volume. The pad is
    /// [`EPSILON`], or one relative `f32` step when that would be lost to rounding.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut out = Self::new(*first, *first);
        for p in rest {
            out.add_point(*p);
        }

        let widen = |lo: &mut f32, hi: &mut f32| {
            if *lo == *hi {
                let pad = EPSILON.max(lo.abs() * f32::EPSILON);
                *lo -= pad;
                *hi += pad;
            }
        };
        widen(&mut out.min.x, &mut out.max.x);
        widen(&mut out.min.y, &mut out.max.y);
        widen(&mut out.min.z, &mut out.max.z);
        Some(out)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grows the box to include `point`.
    pub fn add_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Box around `self` after transforming by `m`. Stays axis-aligned.
    pub fn transform(&self, m: &Mat4) -> Self {
        let center = self.center().transform(m);
        let extents = self.half_extents().transform_normal(&m.abs());
        Self::new(center - extents, center + extents)
    }

    pub fn merge(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// Sphere at the center, reaching every corner.
    pub fn to_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_min_max(self.min, self.max)
    }

    /// Corners in a fixed order: top face (`max.z`) first, then bottom face.
    pub fn corners(&self) -> [Vec3; Self::CORNER_COUNT] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, lo.z),
        ]
    }

    /// Closest point of the box to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    pub fn to_array(&self) -> [f32; 6] {
        let (a, b) = (self.min, self.max);
        [a.x, a.y, a.z, b.x, b.y, b.z]
    }

    fn from_array([ax, ay, az, bx, by, bz]: [f32; 6]) -> Self {
        Self::new(Vec3::new(ax, ay, az), Vec3::new(bx, by, bz))
    }
}

impl Contains<Vec3> for BoundingBox {
    fn contains(&self, p: &Vec3) -> Containment {
        let inside = self.min.x <= p.x
            && p.x <= self.max.x
            && self.min.y <= p.y
            && p.y <= self.max.y
            && self.min.z <= p.z
            && p.z <= self.max.z;
        if inside {
            Containment::Fully
        } else {
            Containment::None
        }
    }
}

impl Contains<BoundingSphere> for BoundingBox {
    fn contains(&self, sphere: &BoundingSphere) -> Containment {
        let (c, r) = (sphere.center, sphere.radius);
        if self.closest_point(c).distance_squared(c) > r * r {
            return Containment::None;
        }

        let fits = |lo: f32, hi: f32, v: f32| lo + r <= v && v <= hi - r && hi - lo > r;
        if fits(self.min.x, self.max.x, c.x)
            && fits(self.min.y, self.max.y, c.y)
            && fits(self.min.z, self.max.z, c.z)
        {
            Containment::Fully
        } else {
            Containment::Partial
        }
    }
}

impl Contains<BoundingBox> for BoundingBox {
    fn contains(&self, other: &BoundingBox) -> Containment {
        let disjoint = self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z;
        if disjoint {
            return Containment::None;
        }

        let enclosed = self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
            && self.min.z <= other.min.z
            && other.max.z <= self.max.z;
        if enclosed {
            Containment::Fully
        } else {
            Containment::Partial
        }
    }
}

impl Intersects<BoundingBox> for BoundingBox {
    type Output = bool;

    fn intersects(&self, other: &BoundingBox) -> bool {
        self.contains(other).overlaps()
    }
}

impl Intersects<BoundingSphere> for BoundingBox {
    type Output = bool;

    fn intersects(&self, sphere: &BoundingSphere) -> bool {
        self.contains(sphere).overlaps()
    }
}

impl Intersects<Plane> for BoundingBox {
    type Output = bool;

    fn intersects(&self, plane: &Plane) -> bool {
        plane.intersects(self)
    }
}

impl Intersects<Ray> for BoundingBox {
    type Output = bool;

    fn intersects(&self, ray: &Ray) -> bool {
        ray.box_entry(self).is_some()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for BoundingBox {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<6>(s).map(Self::from_array)
    }
}

impl BinaryCodec for BoundingBox {
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

    fn cube() -> BoundingBox {
        BoundingBox::new(Vec3::ZERO, Vec3::splat(2.0))
    }

    #[test]
    fn contains_point() {
        assert_eq!(cube().contains(&Vec3::ONE), Containment::Fully);
        assert_eq!(cube().contains(&Vec3::splat(3.0)), Containment::None);
        assert_eq!(cube().contains(&Vec3::splat(2.0)), Containment::Fully);
        assert_eq!(
            cube().contains(&Vec3::new(1.0, 1.0, -0.1)),
            Containment::None
        );
    }

    #[test]
    fn contains_sphere() {
        let inside = BoundingSphere::new(Vec3::ONE, 0.5);
        let straddling = BoundingSphere::new(Vec3::new(2.0, 1.0, 1.0), 0.5);
        let outside = BoundingSphere::new(Vec3::splat(5.0), 1.0);
        assert_eq!(cube().contains(&inside), Containment::Fully);
        assert_eq!(cube().contains(&straddling), Containment::Partial);
        assert_eq!(cube().contains(&outside), Containment::None);
    }

    #[test]
    fn contains_box() {
        let inner = BoundingBox::new(Vec3::HALF, Vec3::ONE);
        let overlapping = BoundingBox::new(Vec3::ONE, Vec3::splat(3.0));
        let far = BoundingBox::new(Vec3::splat(5.0), Vec3::splat(6.0));
        assert_eq!(cube().contains(&inner), Containment::Fully);
        assert_eq!(cube().contains(&cube()), Containment::Fully);
        assert_eq!(cube().contains(&overlapping), Containment::Partial);
        assert_eq!(cube().contains(&far), Containment::None);
        assert!(cube().intersects(&overlapping));
    }

    #[test]
    fn from_points_reduces_and_widens_flat_axes() {
        assert!(BoundingBox::from_points(&[]).is_none());

        let b = BoundingBox::from_points(&[
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(b.min.x, -1.0);
        assert_eq!(b.max.z, 5.0);
        assert!(b.min.y < 0.0 && b.max.y > 0.0);

        let single = BoundingBox::from_points(&[Vec3::new(5.0, -300.0, 0.0)]).unwrap();
        assert!(single.min.x < 5.0 && single.max.x > 5.0);
        assert!(single.min.y < -300.0 && single.max.y > -300.0);
    }

    #[test]
    fn add_point_and_merge() {
        let mut b = cube();
        b.add_point(Vec3::new(-1.0, 1.0, 4.0));
        assert_eq!(b, BoundingBox::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 4.0)));

        let m = cube().merged(&BoundingBox::new(Vec3::splat(5.0), Vec3::splat(6.0)));
        assert_eq!(m, BoundingBox::new(Vec3::ZERO, Vec3::splat(6.0)));
    }

    #[test]
    fn transform_keeps_axis_alignment() {
        let rotated = cube().transform(&Mat4::rotation_z(90.0));
        assert_eq!(rotated.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(rotated.max, Vec3::new(0.0, 2.0, 2.0));

        let moved = cube().transform(&Mat4::translation(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(moved, BoundingBox::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 2.0)));
    }

    #[test]
    fn corners_in_fixed_order() {
        let c = cube().corners();
        assert_eq!(c[0], Vec3::splat(2.0));
        assert_eq!(c[1], Vec3::new(0.0, 2.0, 2.0));
        assert_eq!(c[7], Vec3::ZERO);
        assert!(c.iter().all(|p| cube().contains(p) == Containment::Fully));
    }

    #[test]
    fn to_sphere_reaches_corners() {
        let s = cube().to_sphere();
        assert_eq!(s.center, Vec3::ONE);
        assert!((s.radius - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn text_fallback_is_zero_box() {
        assert_eq!(
            crate::text::parse_or_default::<BoundingBox>("1, 2, 3"),
            BoundingBox::default()
        );
        let b = "(0, 0, 0, 2, 2, 2)".parse::<BoundingBox>().unwrap();
        assert_eq!(b, cube());
    }
}
