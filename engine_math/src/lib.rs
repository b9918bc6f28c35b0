//! `engine_math`
//!
//! 3D math kernel for games and simulations.
//!
//! Design goals:
//! - Plain `Copy` value types; every operation is pure and synchronous.
//! - Angles are degrees at every public entry point.
//! - Row vectors: `v * M`, translation lives in row 3, `A * B` applies `A` first.
//! - Shape tests go through the `Contains` and `Intersects` traits.
//! - Strict text parsing with an explicit fail-soft opt-in.
//! - No `unsafe`.

mod macros;

pub mod bounding_box;
pub mod bounding_sphere;
pub mod codec;
pub mod colour;
pub mod config;
pub mod containment;
pub mod intersect;
pub mod mat4;
pub mod plane;
pub mod quat;
pub mod random;
pub mod ray;
pub mod rect;
pub mod report;
pub mod scalar;
pub mod text;
pub mod vec2;
pub mod vec3;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::bounding_box::BoundingBox;
    pub use crate::bounding_sphere::BoundingSphere;
    pub use crate::codec::{decode_from_bytes, encode_to_bytes, BinaryCodec};
    pub use crate::colour::Colour;
    pub use crate::containment::{Containment, Contains};
    pub use crate::intersect::{IntersectionType, Intersects};
    pub use crate::mat4::Mat4;
    pub use crate::plane::Plane;
    pub use crate::quat::Quat;
    pub use crate::random::MathRng;
    pub use crate::ray::Ray;
    pub use crate::rect::{Rect, Size};
    pub use crate::scalar::EPSILON;
    pub use crate::text::{parse_or_default, ParseError};
    pub use crate::vec2::Vec2;
    pub use crate::vec3::Vec3;
}
