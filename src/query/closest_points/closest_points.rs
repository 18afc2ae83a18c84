use crate::math::{Isometry, Point, Real};

/// Closest points information.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ClosestPoints {
    /// The two objects are intersecting.
    Intersecting,
    /// The two objects are non-intersecting but closer than a given
    /// user-defined distance. Both points are expressed in the local-space
    /// of their respective shape.
    WithinMargin(Point<Real>, Point<Real>),
    /// The two objects are non-intersecting and further apart than a given
    /// user-defined distance.
    Disjoint,
}

impl ClosestPoints {
    /// Swaps the two points.
    pub fn flip(&mut self) {
        if let ClosestPoints::WithinMargin(p1, p2) = self {
            std::mem::swap(p1, p2)
        }
    }

    /// Transforms the points by the given isometries.
    pub fn transform_by(self, pos1: &Isometry<Real>, pos2: &Isometry<Real>) -> Self {
        if let ClosestPoints::WithinMargin(p1, p2) = self {
            ClosestPoints::WithinMargin(pos1 * p1, pos2 * p2)
        } else {
            self
        }
    }
}
