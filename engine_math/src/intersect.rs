//! Intersection traits shared by planes, rays and bounding volumes.

use serde::{Deserialize, Serialize};

/// Which side of a plane something lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntersectionType {
    /// Classification was impossible (degenerate plane or NaN input).
    None,
    /// Touches or straddles the plane.
    Intersect,
    /// Entirely on the side the normal points to.
    Front,
    /// Entirely behind the plane.
    Back,
}

/// Intersection test against a `T`.
///
/// Volume tests produce `bool`. Tests that can report a contact point
/// produce `Option<Vec3>`.
pub trait Intersects<T> {
    type Output;

    fn intersects(&self, other: &T) -> Self::Output;
}
