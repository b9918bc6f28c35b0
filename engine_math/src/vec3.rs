//! 3D vector.
//!
//! Direction constants follow a right-handed, Y-up frame with `-Z` forward.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::macros::componentwise_ops;
use crate::mat4::Mat4;
use crate::scalar::{self, EPSILON};
use crate::text::{parse_components, write_components, ParseError};
use crate::vec2::Vec2;

/// 3D vector. Equality is exact; use [`Vec3::equal_enough`] for tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

componentwise_ops!(Vec3 { x, y, z });

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const HALF: Self = Self::new(0.5, 0.5, 0.5);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    pub const BACKWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// All components exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// All components within [`EPSILON`] of zero.
    pub fn is_close_to_zero(self) -> bool {
        self.equal_enough(Self::ZERO, EPSILON)
    }

    /// `|len² - 1| < ε²`.
    pub fn is_normalized(self) -> bool {
        (self.length_squared() - 1.0).abs() < EPSILON * EPSILON
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
        Self::new(
            scalar::lerp(self.x, to.x, t),
            scalar::lerp(self.y, to.y, t),
            scalar::lerp(self.z, to.z, t),
        )
    }

    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            scalar::clamp(self.x, min.x, max.x),
            scalar::clamp(self.y, min.y, max.y),
            scalar::clamp(self.z, min.z, max.z),
        )
    }

    pub fn min(self, rhs: Self) -> Self {
        Self::new(
            scalar::min(self.x, rhs.x),
            scalar::min(self.y, rhs.y),
            scalar::min(self.z, rhs.z),
        )
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(
            scalar::max(self.x, rhs.x),
            scalar::max(self.y, rhs.y),
            scalar::max(self.z, rhs.z),
        )
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Transforms a point with the row-vector convention: `[x y z 1] * m`.
    pub fn transform(self, m: &Mat4) -> Self {
        let m = &m.m;
        Self::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0] + m[3][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1] + m[3][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2] + m[3][2],
        )
    }

    /// Transforms a direction: `[x y z 0] * m`.
    pub fn transform_normal(self, m: &Mat4) -> Self {
        let m = &m.m;
        Self::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        )
    }

    /// Angle from `self` to `to` in degrees, in `[0, 360)`.
    ///
    /// The reflex branch is picked by the sign of the Z component of the cross
    /// product. Returns 0 when either vector is zero.
    pub fn angle_between(self, to: Self) -> f32 {
        if self.is_zero() || to.is_zero() {
            return 0.0;
        }
        let cos = scalar::clamp(self.normalize().dot(to.normalize()), -1.0, 1.0);
        let angle = scalar::acos_deg(cos);
        if self.cross(to).z < 0.0 {
            360.0 - angle
        } else {
            angle
        }
    }

    pub fn equal_enough(self, rhs: Self, threshold: f32) -> bool {
        (self.x - rhs.x).abs() <= threshold
            && (self.y - rhs.y).abs() <= threshold
            && (self.z - rhs.z).abs() <= threshold
    }

    pub fn approx_eq(self, rhs: Self) -> bool {
        self.equal_enough(rhs, EPSILON)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec2> for Vec3 {
    fn from(v: Vec2) -> Self {
        v.extend(0.0)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for Vec3 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<3>(s).map(Self::from)
    }
}

impl BinaryCodec for Vec3 {
    const SIZE_IN_BYTES: usize = 12;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        read_f32s::<_, 3>(r).map(Self::from)
    }
}
