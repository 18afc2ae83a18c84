use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector};

/// A view frustum described by six clipping planes.
///
/// Each plane is given by its outward unit normal `n` and its offset `d`: a
/// point `x` is on the inner side of the plane whenever `n · x + d <= 0`.
/// The volume of the frustum is the intersection of the six inner half-spaces.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Frustum {
    /// The six clipping planes as `(outward normal, offset)` pairs.
    pub planes: [(UnitVector<Real>, Real); 6],
}

impl Frustum {
    /// Creates a frustum from its six clipping planes.
    pub fn from_planes(planes: [(UnitVector<Real>, Real); 6]) -> Self {
        Self { planes }
    }

    /// Is the given point inside of this frustum?
    #[inline]
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        self.planes
            .iter()
            .all(|(n, d)| n.dot(&pt.coords) + d <= 0.0)
    }

    /// Conservatively tests whether the given AABB may intersect this frustum.
    ///
    /// An AABB lying completely on the outer side of any of the six planes is
    /// rejected. This never reports a false negative, but may report an
    /// intersection for boxes located close to a frustum corner.
    #[inline]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        for (n, d) in &self.planes {
            // The AABB corner that minimizes `n · x`.
            let most_inside = -aabb.support_dot(&-**n);

            if most_inside + d > 0.0 {
                return false;
            }
        }

        true
    }
}
