//! Scalar helpers shared by every other math type.
//!
//! Angles in this crate are expressed in **degrees** at the public surface.
//! The trigonometric helpers below return exact values at integer multiples
//! of 30° and 45° so that axis rotations built from them stay exact.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::vec3::Vec3;

/// Tolerance used by every `equal_enough` comparison in the kernel.
pub const EPSILON: f32 = 1.192_092_9e-12;

const SQRT_3_OVER_2: f32 = 0.866_025_4;

/// Returns the greater of `value` and `min`.
pub fn greater_than(value: f32, min: f32) -> f32 {
    if value > min {
        value
    } else {
        min
    }
}

/// Returns the lesser of `value` and `max`.
pub fn less_than(value: f32, max: f32) -> f32 {
    if value < max {
        value
    } else {
        max
    }
}

pub fn min(a: f32, b: f32) -> f32 {
    less_than(a, b)
}

pub fn max(a: f32, b: f32) -> f32 {
    greater_than(a, b)
}

/// Bounds `value` to `[min, max]`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    less_than(greater_than(value, min), max)
}

/// Bounds `value` to `[0, 1]`.
pub fn clamp_unit(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Linear interpolation. `t` is not clamped, values outside `[0, 1]` extrapolate.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn squared(value: f32) -> f32 {
    value * value
}

pub fn cubed(value: f32) -> f32 {
    value * value * value
}

/// Rounds half away from zero.
pub fn round(value: f32) -> i32 {
    if value > 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

/// `|a - b| <= EPSILON`.
pub fn equal_enough(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Sine of an angle in degrees.
pub fn sin_deg(degrees: f32) -> f32 {
    let r = degrees.rem_euclid(360.0);
    let (reference, sign) = if r <= 90.0 {
        (r, 1.0)
    } else if r <= 180.0 {
        (180.0 - r, 1.0)
    } else if r <= 270.0 {
        (r - 180.0, -1.0)
    } else {
        (360.0 - r, -1.0)
    };
    sign * first_quadrant_sin(reference)
}

/// Cosine of an angle in degrees.
pub fn cos_deg(degrees: f32) -> f32 {
    sin_deg(degrees + 90.0)
}

/// Tangent of an angle in degrees. Infinite at odd multiples of 90°.
pub fn tan_deg(degrees: f32) -> f32 {
    sin_deg(degrees) / cos_deg(degrees)
}

pub fn acos_deg(value: f32) -> f32 {
    value.acos().to_degrees()
}

pub fn atan_deg(value: f32) -> f32 {
    value.atan().to_degrees()
}

pub fn atan2_deg(y: f32, x: f32) -> f32 {
    y.atan2(x).to_degrees()
}

fn first_quadrant_sin(degrees: f32) -> f32 {
    // Table angles are exact.
    if degrees == 0.0 {
        0.0
    } else if degrees == 30.0 {
        0.5
    } else if degrees == 45.0 {
        FRAC_1_SQRT_2
    } else if degrees == 60.0 {
        SQRT_3_OVER_2
    } else if degrees == 90.0 {
        1.0
    } else {
        degrees.to_radians().sin()
    }
}

/// Rotates `position` about the Y axis by `degrees`, leaving `y` untouched.
pub fn rotate_position(position: Vec3, degrees: f32) -> Vec3 {
    let (s, c) = (sin_deg(degrees), cos_deg(degrees));
    Vec3::new(
        position.x * c - position.z * s,
        position.y,
        position.x * s + position.z * c,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(5.0, 0.0, 2.0), 2.0);
        assert_eq!(clamp(-1.0, 0.0, 2.0), 0.0);
        assert_eq!(clamp(1.5, 0.0, 2.0), 1.5);
        assert_eq!(clamp_unit(1.5), 1.0);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), -10.0);
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round(2.5), 3);
        assert_eq!(round(2.4), 2);
        assert_eq!(round(-2.5), -3);
        assert_eq!(round(-2.4), -2);
    }

    #[test]
    fn trig_exact_at_table_angles() {
        assert_eq!(sin_deg(0.0), 0.0);
        assert_eq!(sin_deg(30.0), 0.5);
        assert_eq!(sin_deg(90.0), 1.0);
        assert_eq!(sin_deg(-90.0), -1.0);
        assert_eq!(sin_deg(-30.0), -0.5);
        assert_eq!(sin_deg(150.0), 0.5);
        assert_eq!(cos_deg(0.0), 1.0);
        assert_eq!(cos_deg(90.0), 0.0);
        assert_eq!(cos_deg(180.0), -1.0);
        assert_eq!(cos_deg(60.0), 0.5);
        assert_eq!(sin_deg(45.0), cos_deg(45.0));
    }

    #[test]
    fn trig_matches_std_elsewhere() {
        for deg in [10.0_f32, 73.0, 200.0, -117.0, 725.0] {
            assert!((sin_deg(deg) - deg.to_radians().sin()).abs() < 1e-5);
            assert!((cos_deg(deg) - deg.to_radians().cos()).abs() < 1e-5);
        }
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inverse_trig_in_degrees() {
        assert!((acos_deg(0.0) - 90.0).abs() < 1e-4);
        assert!((atan2_deg(1.0, 0.0) - 90.0).abs() < 1e-4);
        assert!((atan_deg(1.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn equal_enough_is_tight() {
        assert!(equal_enough(1.0, 1.0));
        assert!(!equal_enough(1.0, 1.0001));
    }

    #[test]
    fn rotate_position_quarter_turn() {
        let p = rotate_position(Vec3::new(1.0, 2.0, 0.0), 90.0);
        assert_eq!(p, Vec3::new(0.0, 2.0, 1.0));
    }
}
