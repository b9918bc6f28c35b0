//! 4x4 transform matrix.
//!
//! # Layout
//! Row-major, row-vector convention. A point is transformed as `[x y z 1] * M`,
//! so the translation lives in the bottom row and `a * b` applies `a` first.
//!
//! ```text
//!        c0   c1   c2   c3
//! r0  | M11  M12  M13  M14 |   right
//! r1  | M21  M22  M23  M24 |   up
//! r2  | M31  M32  M33  M34 |   forward
//! r3  | M41  M42  M43  M44 |   translation
//! ```
//!
//! Rotation and projection angles are in degrees.

use std::fmt;
use std::io::{Read, Write};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::quat::Quat;
use crate::scalar::{self, EPSILON};
use crate::text::{parse_components, ParseError};
use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// 4x4 matrix, `m[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f32, m12: f32, m13: f32, m14: f32,
        m21: f32, m22: f32, m23: f32, m24: f32,
        m31: f32, m32: f32, m33: f32, m34: f32,
        m41: f32, m42: f32, m43: f32, m44: f32,
    ) -> Self {
        Self {
            m: [
                [m11, m12, m13, m14],
                [m21, m22, m23, m24],
                [m31, m32, m33, m34],
                [m41, m42, m43, m44],
            ],
        }
    }

    /// Builds a matrix from three basis rows; the bottom row is `(0, 0, 0, 1)`.
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self {
            m: [
                [r0.x, r0.y, r0.z, 0.0],
                [r1.x, r1.y, r1.z, 0.0],
                [r2.x, r2.y, r2.z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn translation(t: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[3] = [t.x, t.y, t.z, 1.0];
        out
    }

    pub fn scale(s: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = s.x;
        out.m[1][1] = s.y;
        out.m[2][2] = s.z;
        out
    }

    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(Vec3::splat(s))
    }

    /// Scale followed by translation.
    pub fn translation_scale(t: Vec3, s: Vec3) -> Self {
        let mut out = Self::scale(s);
        out.set_translation(t);
        out
    }

    pub fn rotation_x(degrees: f32) -> Self {
        let (s, c) = (scalar::sin_deg(degrees), scalar::cos_deg(degrees));
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = (scalar::sin_deg(degrees), scalar::cos_deg(degrees));
        Self::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_z(degrees: f32) -> Self {
        let (s, c) = (scalar::sin_deg(degrees), scalar::cos_deg(degrees));
        Self::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// X rotation, then Y, then Z.
    pub fn rotation_xyz(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        Self::rotation_x(x_deg) * Self::rotation_y(y_deg) * Self::rotation_z(z_deg)
    }

    /// Yaw about Y, pitch about X, roll about Z.
    pub fn yaw_pitch_roll(yaw_deg: f32, pitch_deg: f32, roll_deg: f32) -> Self {
        Self::from_quat(Quat::from_yaw_pitch_roll(yaw_deg, pitch_deg, roll_deg))
    }

    pub fn from_quat(q: Quat) -> Self {
        let (xx, yy, zz) = (q.x * q.x, q.y * q.y, q.z * q.z);
        let (xy, zw) = (q.x * q.y, q.z * q.w);
        let (zx, yw) = (q.z * q.x, q.y * q.w);
        let (yz, xw) = (q.y * q.z, q.x * q.w);
        Self::new(
            1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw), 2.0 * (zx - yw), 0.0,
            2.0 * (xy - zw), 1.0 - 2.0 * (zz + xx), 2.0 * (yz + xw), 0.0,
            2.0 * (zx + yw), 2.0 * (yz - xw), 1.0 - 2.0 * (yy + xx), 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z = (eye - target).normalize();
        let mut x = up.cross(z).normalize();
        if x.is_zero() {
            x = Vec3::UNIT_X;
        }
        let y = z.cross(x);
        Self::new(
            x.x, y.x, z.x, 0.0,
            x.y, y.y, z.y, 0.0,
            x.z, y.z, z.z, 0.0,
            -x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0,
        )
    }

    /// Right-handed perspective projection with a vertical field of view in degrees.
    pub fn perspective_fov(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let y_scale = 1.0 / scalar::tan_deg(fov_deg * 0.5);
        let depth = near - far;
        Self::new(
            y_scale / aspect, 0.0, 0.0, 0.0,
            0.0, y_scale, 0.0, 0.0,
            0.0, 0.0, far / depth, -1.0,
            0.0, 0.0, near * far / depth, 0.0,
        )
    }

    /// Off-center orthographic projection.
    pub fn orthographic(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self::new(
            2.0 / (right - left), 0.0, 0.0, 0.0,
            0.0, 2.0 / (top - bottom), 0.0, 0.0,
            0.0, 0.0, 1.0 / (near - far), 0.0,
            (left + right) / (left - right),
            (top + bottom) / (bottom - top),
            near / (near - far),
            1.0,
        )
    }

    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    pub fn set_translation(&mut self, t: Vec3) {
        self.m[3][0] = t.x;
        self.m[3][1] = t.y;
        self.m[3][2] = t.z;
    }

    pub fn scale_part(&self) -> Vec3 {
        Vec3::new(self.m[0][0], self.m[1][1], self.m[2][2])
    }

    pub fn right(&self) -> Vec3 {
        self.basis(0)
    }

    pub fn up(&self) -> Vec3 {
        self.basis(1)
    }

    pub fn forward(&self) -> Vec3 {
        self.basis(2)
    }

    fn basis(&self, row: usize) -> Vec3 {
        Vec3::new(self.m[row][0], self.m[row][1], self.m[row][2])
    }

    /// Row `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<[f32; 4]> {
        self.m.get(index).copied()
    }

    /// Moves the matrix in its own XY plane, through the rotation/scale block.
    pub fn translate_2d(&mut self, v: Vec2) {
        self.m[3][0] += v.x * self.m[0][0] + v.y * self.m[1][0];
        self.m[3][1] += v.x * self.m[0][1] + v.y * self.m[1][1];
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for (r, row) in self.m.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                out.m[c][r] = *v;
            }
        }
        out
    }

    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        let mut out = *self;
        for v in out.m.iter_mut().flatten() {
            *v = f(*v);
        }
        out
    }

    fn zip(&self, rhs: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut out = *self;
        for (a, b) in out.m.iter_mut().flatten().zip(rhs.m.iter().flatten()) {
            *a = f(*a, *b);
        }
        out
    }

    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (slot, v) in out.iter_mut().zip(self.m.iter().flatten()) {
            *slot = *v;
        }
        out
    }

    pub fn from_array(a: [f32; 16]) -> Self {
        let mut out = Self::ZERO;
        for (slot, v) in out.m.iter_mut().flatten().zip(a) {
            *slot = v;
        }
        out
    }

    /// 2x2 sub-determinants of the top two rows (`s`) and bottom two rows (`c`).
    fn minors(&self) -> ([f32; 6], [f32; 6]) {
        let a = &self.m;
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Cofactor inverse. Not guarded: a singular matrix yields infinities/NaN.
    pub fn inverse(&self) -> Self {
        let a = &self.m;
        let (s, c) = self.minors();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        let inv = 1.0 / det;

        Self::new(
            (a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3]) * inv,
            (-a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3]) * inv,
            (a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3]) * inv,
            (-a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3]) * inv,
            (-a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1]) * inv,
            (a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1]) * inv,
            (-a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1]) * inv,
            (a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1]) * inv,
            (a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0]) * inv,
            (-a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0]) * inv,
            (a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0]) * inv,
            (-a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0]) * inv,
            (-a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0]) * inv,
            (a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0]) * inv,
            (-a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0]) * inv,
            (a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0]) * inv,
        )
    }

    /// Inverse, or `None` when `|det| <= EPSILON`.
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() <= EPSILON {
            debug!(det, "matrix is singular");
            return None;
        }
        Some(self.inverse())
    }

    pub fn equal_enough(&self, rhs: &Self, threshold: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(rhs.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= threshold)
    }

    pub fn approx_eq(&self, rhs: &Self) -> bool {
        self.equal_enough(rhs, EPSILON)
    }

    pub fn translation_equal_enough(&self, rhs: &Self, threshold: f32) -> bool {
        self.translation_part()
            .equal_enough(rhs.translation_part(), threshold)
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if rhs == Self::IDENTITY {
            return self;
        }
        let mut out = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                out.m[r][c] = (0..4).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        out
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.transform(&self)
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.map(|v| v * rhs)
    }
}

/// Element-wise.
impl Div for Mat4 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a / b)
    }
}

impl Div<f32> for Mat4 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        self.map(|v| v / rhs)
    }
}

impl Add for Mat4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a + b)
    }
}

impl Sub for Mat4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a - b)
    }
}

impl Neg for Mat4 {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl TryFrom<&[f32]> for Mat4 {
    type Error = anyhow::Error;

    fn try_from(values: &[f32]) -> anyhow::Result<Self> {
        match values.len() {
            16 => {
                let mut a = [0.0; 16];
                a.copy_from_slice(values);
                Ok(Self::from_array(a))
            }
            n if n < 16 => bail!("matrix needs 16 values, slice of {n} is too small"),
            n => bail!("matrix needs 16 values, slice of {n} is too large"),
        }
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.m.iter().flatten().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:.5}")?;
        }
        f.write_str(")")
    }
}

impl FromStr for Mat4 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components::<16>(s).map(Self::from_array)
    }
}

impl BinaryCodec for Mat4 {
    const SIZE_IN_BYTES: usize = 64;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        read_f32s::<_, 16>(r).map(Self::from_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat4 {
        Mat4::new(
            2.0, 0.0, 1.0, 0.0,
            1.0, 3.0, 0.0, 0.0,
            0.0, 1.0, 4.0, 0.0,
            5.0, -2.0, 7.0, 1.0,
        )
    }

    #[test]
    fn translation_moves_origin() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.translation_part(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn identity_law() {
        let m = sample();
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn multiplication_applies_left_first() {
        let s = Mat4::uniform_scale(2.0);
        let t = Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!((s * t) * Vec3::UNIT_X, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!((t * s) * Vec3::UNIT_X, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn inverse_law() {
        let m = sample();
        assert!(m.determinant().abs() > EPSILON);
        let product = m * m.inverse();
        assert!(product.equal_enough(&Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn determinant_of_scale() {
        assert_eq!(Mat4::scale(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn try_inverse_rejects_singular() {
        assert!(Mat4::ZERO.try_inverse().is_none());
        let t = Mat4::translation(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(
            t.try_inverse().unwrap(),
            Mat4::translation(Vec3::new(-4.0, -5.0, -6.0))
        );
    }

    #[test]
    fn transpose_swaps_every_pair() {
        let m = sample();
        let t = m.transpose();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(t.m[c][r], m.m[r][c]);
            }
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn axis_rotations_are_exact_at_quarter_turns() {
        assert_eq!(Mat4::rotation_z(90.0) * Vec3::UNIT_X, Vec3::UNIT_Y);
        assert_eq!(Mat4::rotation_x(90.0) * Vec3::UNIT_Y, Vec3::UNIT_Z);
        assert_eq!(Mat4::rotation_y(90.0) * Vec3::UNIT_Z, Vec3::UNIT_X);
    }

    #[test]
    fn rotation_xyz_matches_closed_form() {
        let (x, y, z) = (30.0, 45.0, 60.0);
        let (sx, cx) = (scalar::sin_deg(x), scalar::cos_deg(x));
        let (sy, cy) = (scalar::sin_deg(y), scalar::cos_deg(y));
        let (sz, cz) = (scalar::sin_deg(z), scalar::cos_deg(z));
        let expected = Mat4::new(
            cy * cz, cy * sz, -sy, 0.0,
            sx * sy * cz - cx * sz, sx * sy * sz + cx * cz, sx * cy, 0.0,
            cx * sy * cz + sx * sz, cx * sy * sz - sx * cz, cx * cy, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        assert!(Mat4::rotation_xyz(x, y, z).equal_enough(&expected, 1e-6));
    }

    #[test]
    fn look_at_puts_target_in_front() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        assert_eq!(view * Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn perspective_maps_near_plane_to_zero_depth() {
        let p = Mat4::perspective_fov(90.0, 1.0, 1.0, 100.0);
        assert!((p.m[1][1] - 1.0).abs() < 1e-6);
        assert_eq!(p.m[2][3], -1.0);
        let z = -1.0;
        let clip_z = z * p.m[2][2] + p.m[3][2];
        let clip_w = z * p.m[2][3];
        assert!((clip_z / clip_w).abs() < 1e-6);
    }

    #[test]
    fn orthographic_maps_extents_to_unit_cube() {
        let o = Mat4::orthographic(-2.0, 2.0, 1.0, -1.0, 0.0, 10.0);
        assert_eq!(o * Vec3::new(2.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(o * Vec3::new(-2.0, -1.0, -10.0), Vec3::new(-1.0, -1.0, 1.0));
    }

    #[test]
    fn translate_2d_goes_through_rotation() {
        let mut m = Mat4::rotation_z(90.0);
        m.translate_2d(Vec2::new(1.0, 0.0));
        assert_eq!(m.translation_part(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rows_and_basis() {
        let m = Mat4::from_rows(Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z);
        assert_eq!(m, Mat4::IDENTITY);
        assert_eq!(sample().row(3), Some([5.0, -2.0, 7.0, 1.0]));
        assert_eq!(sample().row(4), None);
        assert_eq!(sample().forward(), Vec3::new(0.0, 1.0, 4.0));
    }

    #[test]
    fn slice_length_is_checked() {
        let v: Vec<f32> = (0..16).map(|i| i as f32).collect();
        let m = Mat4::try_from(v.as_slice()).unwrap();
        assert_eq!(m.m[3][3], 15.0);

        let err = Mat4::try_from(&v[..15]).unwrap_err();
        assert!(err.to_string().contains("too small"));
        let long: Vec<f32> = vec![0.0; 17];
        let err = Mat4::try_from(long.as_slice()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn elementwise_ops() {
        let m = sample();
        assert_eq!(m + Mat4::ZERO, m);
        assert_eq!(m - m, Mat4::ZERO);
        assert_eq!(-(-m), m);
        assert_eq!((m * 2.0) / 2.0, m);
        let d = Mat4::IDENTITY * 4.0 / Mat4::uniform_scale(2.0);
        assert_eq!(d.m[0][0], 2.0);
        assert_eq!((-Mat4::IDENTITY).abs(), Mat4::IDENTITY);
    }

    #[test]
    fn text_uses_five_decimals() {
        let s = Mat4::IDENTITY.to_string();
        assert!(s.starts_with("(1.00000, 0.00000"));
        assert_eq!(s.parse::<Mat4>().unwrap(), Mat4::IDENTITY);
        assert_eq!(crate::text::parse_or_default::<Mat4>("1, 2, 3"), Mat4::IDENTITY);
    }
}
