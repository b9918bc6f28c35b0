//! 8-bit RGBA colour.
//!
//! Binary form is four raw bytes `R G B A`, written and read symmetrically.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::codec::BinaryCodec;
use crate::scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GREY: Self = Self::rgb(127, 127, 127);
    pub const DARK_GREY: Self = Self::rgb(56, 56, 56);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const PURPLE: Self = Self::rgb(127, 0, 255);
    pub const PINK: Self = Self::rgb(255, 0, 255);
    pub const ORANGE: Self = Self::rgb(255, 127, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 127, 255);
    pub const TURQUOISE: Self = Self::rgb(0, 255, 255);
    pub const BROWN: Self = Self::rgb(127, 64, 0);
    pub const GOLD: Self = Self::rgb(255, 204, 0);
    pub const SILVER: Self = Self::rgb(181, 181, 181);
    pub const BRONZE: Self = Self::rgb(167, 96, 0);
    pub const HALF_TRANSPARENT_BLACK: Self = Self::new(0, 0, 0, 127);
    pub const HALF_TRANSPARENT_WHITE: Self = Self::new(255, 255, 255, 127);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels in `0.0..=255.0`; out-of-range values are clamped, fractions truncated.
    pub fn from_floats(r: f32, g: f32, b: f32, a: f32) -> Self {
        let channel = |v: f32| scalar::clamp(v, 0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Unclamped-`t` interpolation per channel, saturating at the channel range.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let mix = |a: u8, b: u8| scalar::lerp(a as f32, b as f32, t);
        Self::from_floats(
            mix(self.r, to.r),
            mix(self.g, to.g),
            mix(self.b, to.b),
            mix(self.a, to.a),
        )
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `0xRRGGBBAA`.
    pub fn to_packed_rgba(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub fn from_packed_rgba(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self::new(r, g, b, a)
    }
}

impl BinaryCodec for Colour {
    const SIZE_IN_BYTES: usize = 4;

    fn save<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        w.write_all(&[self.r, self.g, self.b, self.a])?;
        Ok(())
    }

    fn load<R: Read>(r: &mut R) -> anyhow::Result<Self> {
        let mut buf = [0u8; 4];
        r.read_exact(&mut buf)?;
        let [r, g, b, a] = buf;
        Ok(Self::new(r, g, b, a))
    }
}
