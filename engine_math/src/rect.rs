//! Screen-space rectangle and size.
//!
//! Y grows downwards: `y` is the top edge and `bottom()` is `y + height`.
//! Unlike the 3D types, the text form of [`Rect`] is strict: exactly four
//! comma-separated numbers, with no brace tolerance and no fail-soft default.

use std::fmt;
use std::io::{Read, Write};
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{read_f32s, write_f32s, BinaryCodec};
use crate::containment::{Containment, Contains};
use crate::scalar::{self, EPSILON};
use crate::text::ParseError;
use crate::vec2::Vec2;

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const HALF: Self = Self::new(0.5, 0.5);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// True when either side is zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(
            scalar::max(self.width, rhs.width),
            scalar::max(self.height, rhs.height),
        )
    }

    pub fn min(self, rhs: Self) -> Self {
        Self::new(
            scalar::min(self.width, rhs.width),
            scalar::min(self.height, rhs.height),
        )
    }

    /// Rounds both sides half away from zero.
    pub fn round(self) -> Self {
        Self::new(
            scalar::round(self.width) as f32,
            scalar::round(self.height) as f32,
        )
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<Vec2> for Size {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for Size {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl Mul for Size {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.width * rhs.width, self.height * rhs.height)
    }
}

impl Mul<f32> for Size {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

impl Div for Size {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(self.width / rhs.width, self.height / rhs.height)
    }
}

impl Div<f32> for Size {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.width / rhs, self.height / rhs)
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_position_size(position: Vec2, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        let size = bottom_right - top_left;
        Self::new(top_left.x, top_left.y, size.x, size.y)
    }

    pub fn from_center(center: Vec2, size: Size) -> Self {
        Self::new(
            center.x - size.half_width(),
            center.y - size.half_height(),
            size.width,
            size.height,
        )
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.x, self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        ]
    }

    pub fn translate(&self, amount: Vec2) -> Self {
        Self::new(self.x + amount.x, self.y + amount.y, self.width, self.height)
    }

    /// Moves every edge inwards by `amount`.
    pub fn shrink(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - amount * 2.0,
            self.height - amount * 2.0,
        )
    }

    /// Moves every edge outwards by `amount`.
    pub fn grow(&self, amount: f32) -> Self {
        self.shrink(-amount)
    }

    /// Scales the size by the given factors, keeping the center fixed.
    pub fn center_scale(&self, width_factor: f32, height_factor: f32) -> Self {
        let scaled = Size::new(self.width * width_factor, self.height * height_factor);
        let offset = (self.size() - scaled) / 2.0;
        Self::from_position_size(self.position() + offset.to_vec2(), scaled)
    }

    /// Maps `relative` (in unit coordinates of `self`) into `self`.
    pub fn inner(&self, relative: &Rect) -> Self {
        Self::new(
            self.x + self.width * relative.x,
            self.y + self.height * relative.y,
            self.width * relative.width,
            self.height * relative.height,
        )
    }

    /// Edges inclusive.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Coarse test: the circle's bounding square touches the rectangle.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius >= self.x
            && center.x - radius <= self.right()
            && center.y + radius >= self.y
            && center.y - radius <= self.bottom()
    }

    pub fn equal_enough(&self, rhs: &Self, threshold: f32) -> bool {
        (self.x - rhs.x).abs() <= threshold
            && (self.y - rhs.y).abs() <= threshold
            && (self.width - rhs.width).abs() <= threshold
            && (self.height - rhs.height).abs() <= threshold
    }

    pub fn approx_eq(&self, rhs: &Self) -> bool {
        self.equal_enough(rhs, EPSILON)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl Contains<Rect> for Rect {
    fn contains(&self, other: &Rect) -> Containment {
        if self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom()
        {
            return Containment::None;
        }
        if self.x <= other.x
            && self.right() >= other.right()
            && self.y <= other.y
            && self.bottom() >= other.bottom()
        {
            Containment::Fully
        } else {
            Containment::Partial
        }
    }
}

/// `x,y,width,height`.
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Rect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(ParseError::ComponentCount {
                expected: 4,
                found: parts.len(),
            });
        }
        let mut v = [0.0_f32; 4];
        for (slot, part) in v.iter_mut().zip(&parts) {
            let part = part.trim();
            *slot = part
                .parse()
                .map_err(|_| ParseError::InvalidNumber(part.to_string()))?;
        }
        Ok(Self::new(v[0], v[1], v[2], v[3]))
    }
}

impl BinaryCodec for Rect {
    const SIZE_IN_BYTES: usize = 16;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        write_f32s(w, &self.to_array())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        let [x, y, width, height] = read_f32s::<_, 4>(r)?;
        Ok(Self::new(x, y, width, height))
    }
}
