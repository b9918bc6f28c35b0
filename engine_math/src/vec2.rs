//! 2D vector.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::macros::componentwise_ops;
use crate::mat4::Mat4;
use crate::scalar::{self, EPSILON};
use crate::text::{parse_components, write_components, ParseError};
use crate::vec3::Vec3;

/// 2D vector. Equality is exact; use [`Vec2::equal_enough`] for tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

componentwise_ops!(Vec2 { x, y });

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product of `(self, 0)` and `(rhs, 0)`.
    pub fn perp_dot(self, rhs: Self) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction. The zero vector is returned unchanged.
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq == 0.0 {
            return self;
        }
        self / len_sq.sqrt()
    }

    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    pub fn distance_squared(self, rhs: Self) -> f32 {
        (self - rhs).length_squared()
    }

    /// Unclamped linear interpolation.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self::new(scalar::lerp(self.x, to.x, t), scalar::lerp(self.y, to.y, t))
    }

    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            scalar::clamp(self.x, min.x, max.x),
            scalar::clamp(self.y, min.y, max.y),
        )
    }

    pub fn min(self, rhs: Self) -> Self {
        Self::new(scalar::min(self.x, rhs.x), scalar::min(self.y, rhs.y))
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(scalar::max(self.x, rhs.x), scalar::max(self.y, rhs.y))
    }

    /// Left-hand perpendicular `(-y, x)`.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Point on the unit circle at `degrees`, measured clockwise from `-Y`.
    pub fn on_circle(degrees: f32) -> Self {
        Self::new(scalar::sin_deg(degrees), -scalar::cos_deg(degrees))
    }

    /// Rotates counter-clockwise by `degrees` about the origin.
    pub fn rotate(self, degrees: f32) -> Self {
        let (sin, cos) = (scalar::sin_deg(degrees), scalar::cos_deg(degrees));
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Same direction scaled to `length`. Zero stays zero.
    pub fn with_length(self, length: f32) -> Self {
        self.normalize() * length
    }

    /// Transforms a point (translation applied).
    pub fn transform(self, m: &Mat4) -> Self {
        let m = &m.m;
        Self::new(
            self.x * m[0][0] + self.y * m[1][0] + m[3][0],
            self.x * m[0][1] + self.y * m[1][1] + m[3][1],
        )
    }

    /// Transforms a direction (translation ignored).
    pub fn transform_normal(self, m: &Mat4) -> Self {
        let m = &m.m;
        Self::new(
            self.x * m[0][0] + self.y * m[1][0],
            self.x * m[0][1] + self.y * m[1][1],
        )
    }

    /// Angle from `self` to `to` in degrees, in `[0, 360)`.
    ///
    /// Returns 0 when either vector is zero.
    pub fn angle_between(self, to: Self) -> f32 {
        if self.is_zero() || to.is_zero() {
            return 0.0;
        }
        let cos = scalar::clamp(self.normalize().dot(to.normalize()), -1.0, 1.0);
        let angle = scalar::acos_deg(cos);
        if self.perp_dot(to) < 0.0 {
            360.0 - angle
        } else {
            angle
        }
    }

    pub fn equal_enough(self, rhs: Self, threshold: f32) -> bool {
        (self.x - rhs.x).abs() <= threshold && (self.y - rhs.y).abs() <= threshold
    }

    pub fn approx_eq(self, rhs: Self) -> bool {
        self.equal_enough(rhs, EPSILON)
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for Vec2 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<2>(s).map(Self::from)
    }
}

impl BinaryCodec for Vec2 {
    const SIZE_IN_BYTES: usize = 8;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        read_f32s::<_, 2>(r).map(Self::from)
    }
}
