//! Containment classification.

use serde::{Deserialize, Serialize};

/// How much of one shape lies inside another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Containment {
    /// Disjoint.
    None,
    /// Overlapping but not enclosed.
    Partial,
    /// Entirely inside, boundary included.
    Fully,
}

impl Containment {
    /// `Partial` or `Fully`.
    pub fn overlaps(self) -> bool {
        self != Containment::None
    }
}

/// Containment query against a `T`.
pub trait Contains<T> {
    fn contains(&self, other: &T) -> Containment;
}
