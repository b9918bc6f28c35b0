//! Rotation quaternion.
//!
//! Conventions match [`Mat4`]: `Mat4::from_quat(Quat::concatenate(a, b))` equals
//! `Mat4::from_quat(a) * Mat4::from_quat(b)`, i.e. `a` is applied first.
//! Angles are in degrees.

use std::fmt;
use std::io::{Read, Write};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::mat4::Mat4;
use crate::scalar::{self, EPSILON};
use crate::text::{parse_components, write_components, ParseError};
use crate::vec3::Vec3;

/// Squared length at or below which [`Quat::inverse`] leaves the value untouched.
///
/// This is machine epsilon (about `1.19e-7`), not the smallest positive `f32`.
/// A quaternion such as `(1e-4, 0, 0, 0)` therefore comes back as is.
pub const INVERT_THRESHOLD: f32 = f32::EPSILON;

/// `sin θ` at or below which [`Quat::lerp`] returns its first operand.
///
/// Machine epsilon, as for [`INVERT_THRESHOLD`].
pub const LERP_THRESHOLD: f32 = f32::EPSILON;

/// Quaternion `(x, y, z, w)`. Unit length is expected for rotations but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    pub fn vector_part(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotation of `degrees` about `axis`. `axis` should be unit length.
    pub fn from_axis_angle(axis: Vec3, degrees: f32) -> Self {
        let half = degrees * 0.5;
        Self::from_vec3(axis * scalar::sin_deg(half), scalar::cos_deg(half))
    }

    /// Roll about Z, then pitch about X, then yaw about Y.
    pub fn from_yaw_pitch_roll(yaw_deg: f32, pitch_deg: f32, roll_deg: f32) -> Self {
        let (sy, cy) = (scalar::sin_deg(yaw_deg * 0.5), scalar::cos_deg(yaw_deg * 0.5));
        let (sp, cp) = (scalar::sin_deg(pitch_deg * 0.5), scalar::cos_deg(pitch_deg * 0.5));
        let (sr, cr) = (scalar::sin_deg(roll_deg * 0.5), scalar::cos_deg(roll_deg * 0.5));
        Self::new(
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
            cy * cp * sr - sy * sp * cr,
            cy * cp * cr + sy * sp * sr,
        )
    }

    /// Extracts the rotation of the upper 3x3 block, branching on the dominant diagonal term.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let m = &m.m;
        let trace = m[0][0] + m[1][1] + m[2][2];

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt();
            let half = 0.5 / s;
            Self::new(
                (m[1][2] - m[2][1]) * half,
                (m[2][0] - m[0][2]) * half,
                (m[0][1] - m[1][0]) * half,
                s * 0.5,
            )
        } else if m[0][0] >= m[1][1] && m[0][0] >= m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt();
            let half = 0.5 / s;
            Self::new(
                s * 0.5,
                (m[0][1] + m[1][0]) * half,
                (m[0][2] + m[2][0]) * half,
                (m[1][2] - m[2][1]) * half,
            )
        } else if m[1][1] > m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt();
            let half = 0.5 / s;
            Self::new(
                (m[1][0] + m[0][1]) * half,
                s * 0.5,
                (m[2][1] + m[1][2]) * half,
                (m[2][0] - m[0][2]) * half,
            )
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt();
            let half = 0.5 / s;
            Self::new(
                (m[2][0] + m[0][2]) * half,
                (m[2][1] + m[1][2]) * half,
                s * 0.5,
                (m[0][1] - m[1][0]) * half,
            )
        }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit quaternion. A zero quaternion is returned unchanged.
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq == 0.0 {
            return self;
        }
        self * (1.0 / len_sq.sqrt())
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// `conjugate / |q|²`, or `self` when `|q|² <= INVERT_THRESHOLD`.
    pub fn inverse(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq <= INVERT_THRESHOLD {
            return self;
        }
        self.conjugate() * (1.0 / len_sq)
    }

    /// Rotation `a` followed by rotation `b`.
    pub fn concatenate(a: Self, b: Self) -> Self {
        Self::new(
            b.x * a.w + a.x * b.w + (b.y * a.z - b.z * a.y),
            b.y * a.w + a.y * b.w + (b.z * a.x - b.x * a.z),
            b.z * a.w + a.z * b.w + (b.x * a.y - b.y * a.x),
            b.w * a.w - (b.x * a.x + b.y * a.y + b.z * a.z),
        )
    }

    /// Spherical interpolation between `a` and `b`.
    ///
    /// Falls back to `a` when the two are (anti)parallel, where the
    /// interpolation axis is undefined.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let cos = a.dot(b);
        let sin = (1.0 - cos * cos).abs().sqrt();
        if sin.abs() <= LERP_THRESHOLD {
            return a;
        }
        let angle = scalar::atan2_deg(sin, cos);
        let inv_sin = 1.0 / sin;
        let c0 = scalar::sin_deg((1.0 - t) * angle) * inv_sin;
        let c1 = scalar::sin_deg(t * angle) * inv_sin;
        a * c0 + b * c1
    }

    /// Rotates `v` by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        v.transform_normal(&Mat4::from_quat(self))
    }

    pub fn equal_enough(self, rhs: Self, threshold: f32) -> bool {
        (self.x - rhs.x).abs() <= threshold
            && (self.y - rhs.y).abs() <= threshold
            && (self.z - rhs.z).abs() <= threshold
            && (self.w - rhs.w).abs() <= threshold
    }

    pub fn approx_eq(self, rhs: Self) -> bool {
        self.equal_enough(rhs, EPSILON)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Quat {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl Add for Quat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Neg for Quat {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.to_array())
    }
}

impl FromStr for Quat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<4>(s).map(Self::from)
    }
}

impl BinaryCodec for Quat {
    const SIZE_IN_BYTES: usize = 16;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        read_f32s::<_, 4>(r).map(Self::from)
    }
}
