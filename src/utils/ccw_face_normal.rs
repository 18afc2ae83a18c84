use crate::math::{Point, Real, UnitVector};

/// Computes the normal of a counter-clock-wise triangle.
///
/// Returns `None` if the triangle is degenerate.
#[inline]
pub fn ccw_face_normal(pts: [&Point<Real>; 3]) -> Option<UnitVector<Real>> {
    let ab = *pts[1] - *pts[0];
    let ac = *pts[2] - *pts[0];
    let res = ab.cross(&ac);

    UnitVector::try_new(res, crate::math::DEFAULT_EPSILON)
}
