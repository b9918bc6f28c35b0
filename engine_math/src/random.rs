//! Random value helpers over an injected generator.
//!
//! There is no process-wide generator: callers own a [`MathRng`] and pass it
//! where randomness is needed. Seed it for reproducible runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::colour::Colour;
use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// Wraps any [`rand::Rng`] with kernel-typed helpers.
#[derive(Debug, Clone)]
pub struct MathRng<R = StdRng> {
    rng: R,
}

impl MathRng<StdRng> {
    /// Deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> MathRng<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Uniform between `min` and `max`. Returns `min` when the range is empty.
    pub fn float_between(&mut self, min: f32, max: f32) -> f32 {
        if min >= max || min.is_nan() || max.is_nan() {
            return min;
        }
        min + (max - min) * self.rng.gen::<f32>()
    }

    /// Uniform in `[min, max)`. Returns `min` when the range is empty.
    pub fn int_between(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    pub fn vec2_between(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(
            self.float_between(min.x, max.x),
            self.float_between(min.y, max.y),
        )
    }

    pub fn vec3_between(&mut self, min: Vec3, max: Vec3) -> Vec3 {
        Vec3::new(
            self.float_between(min.x, max.x),
            self.float_between(min.y, max.y),
            self.float_between(min.z, max.z),
        )
    }

    /// Uniformly distributed direction.
    pub fn unit_vec3(&mut self) -> Vec3 {
        loop {
            let v = self.vec3_between(-Vec3::ONE, Vec3::ONE);
            let len_sq = v.length_squared();
            if len_sq > 1.0e-6 && len_sq <= 1.0 {
                return v.normalize();
            }
        }
    }

    /// `value` offset by up to `variation` either way.
    pub fn randomize(&mut self, value: f32, variation: f32) -> f32 {
        value + self.float_between(-variation, variation)
    }

    /// Opaque colour with random channels.
    pub fn colour(&mut self) -> Colour {
        let [r, g, b]: [u8; 3] = self.rng.gen();
        Colour::rgb(r, g, b)
    }

    /// Per-channel random colour between `min` and `max`, inclusive.
    pub fn colour_between(&mut self, min: Colour, max: Colour) -> Colour {
        let mut channel = |lo: u8, hi: u8| {
            if lo >= hi {
                lo
            } else {
                self.rng.gen_range(lo..=hi)
            }
        };
        Colour::new(
            channel(min.r, max.r),
            channel(min.g, max.g),
            channel(min.b, max.b),
            channel(min.a, max.a),
        )
    }
}
