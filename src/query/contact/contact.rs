use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;
use std::mem;

/// Geometric description of one contact point between two shapes.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    /// Position of the contact on the first object.
    pub point1: Point<Real>,

    /// Position of the contact on the second object.
    pub point2: Point<Real>,

    /// Contact normal, pointing outward of the first shape.
    pub normal1: Unit<Vector<Real>>,

    /// Contact normal, pointing outward of the second shape.
    ///
    /// This is expressed in the same frame as `normal1`, so it is generally
    /// `-normal1` up to rounding.
    pub normal2: Unit<Vector<Real>>,

    /// Signed distance between the two contact points.
    ///
    /// Negative when the shapes are penetrating; the absolute value is then
    /// the penetration depth.
    pub dist: Real,
}

impl Contact {
    /// Creates a new contact.
    #[inline]
    pub fn new(
        point1: Point<Real>,
        point2: Point<Real>,
        normal1: Unit<Vector<Real>>,
        normal2: Unit<Vector<Real>>,
        dist: Real,
    ) -> Self {
        Contact {
            point1,
            point2,
            normal1,
            normal2,
            dist,
        }
    }

    /// Swaps the roles of the first and second shape.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.point1, &mut self.point2);
        mem::swap(&mut self.normal1, &mut self.normal2);
    }

    /// Returns a flipped copy of `self`.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Transforms all the geometric information of this contact by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Contact {
            point1: m * self.point1,
            point2: m * self.point2,
            normal1: m * self.normal1,
            normal2: m * self.normal2,
            dist: self.dist,
        }
    }
}
