use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;
use na::Unit;

/// A support mapping whose local-space support point is always the origin.
///
/// This is used by queries where only one real shape is involved: the second
/// operand of the Minkowski difference degenerates to a single point.
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn local_support_point_toward(&self, _: &Unit<Vector<Real>>) -> Point<Real> {
        Point::origin()
    }
}
