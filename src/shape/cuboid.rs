//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// A cuboid shape centered at the origin, described by its half-extents.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box
    /// half-width along each axis. They must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.half_extents
            .zip_map(dir, |he, d| if d < 0.0 { -he } else { he })
            .into()
    }
}
