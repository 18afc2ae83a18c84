use crate::math::{Isometry, Real, Vector};
use crate::shape::SupportMap;
use na::Unit;

/// An external estimator of the penetration depth of two overlapping convex
/// shapes.
///
/// The GJK algorithm detects that two shapes overlap but cannot quantify by
/// how much. When a numeric depth and axis are still required (deep contact
/// resolution), the contact pipeline consults an implementation of this
/// trait. The estimation is allowed to be conservative: reporting less
/// penetration than the true depth is acceptable, reporting separation for
/// overlapping shapes is not.
pub trait PenetrationEstimator {
    /// Estimates the separation of two overlapping shapes.
    ///
    /// Returns the (negative) signed separation distance and the unit axis,
    /// expressed in the local-space of the first shape and pointing from the
    /// first shape toward the second, along which translating the second
    /// shape by `-distance` would separate them. Returns `None` if the
    /// estimation failed, in which case the caller falls back to a
    /// zero-depth contact on a stable substitute axis.
    fn estimate_conservative_separation(
        &self,
        pos12: &Isometry<Real>,
        g1: &dyn SupportMap,
        g2: &dyn SupportMap,
    ) -> Option<(Real, Unit<Vector<Real>>)>;
}
