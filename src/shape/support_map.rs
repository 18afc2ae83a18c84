//! Traits for support mapping based shapes.

use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;

/// Traits of convex shapes representable by a support mapping function.
///
/// A support function maps a direction to the shape point which maximizes
/// their dot product. This is the only capability the distance, contact, and
/// shape-casting algorithms of this crate require from a shape.
///
/// Shapes carrying a collision margin report margin-inflated extreme points
/// from [`SupportMap::local_support_point`] and the extreme points of their
/// core surface from [`SupportMap::local_support_point_without_margin`]. For
/// margin-less shapes both coincide, which is what the default implementation
/// expresses.
pub trait SupportMap {
    /// Evaluates the support function of this shape.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Same as `self.local_support_point` except that `dir` is normalized.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    /// Evaluates the support function of this shape's core surface, i.e.,
    /// excluding any collision margin.
    fn local_support_point_without_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        self.local_support_point(dir)
    }

    /// Evaluates the support function of this shape transformed by `transform`.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point(&local_dir)
    }

    /// Same as `self.support_point` except that `dir` is normalized.
    fn support_point_toward(
        &self,
        transform: &Isometry<Real>,
        dir: &Unit<Vector<Real>>,
    ) -> Point<Real> {
        let local_dir = Unit::new_unchecked(transform.inverse_transform_vector(dir));
        transform * self.local_support_point_toward(&local_dir)
    }

    /// Evaluates the margin-less support function of this shape transformed
    /// by `transform`.
    fn support_point_without_margin(
        &self,
        transform: &Isometry<Real>,
        dir: &Vector<Real>,
    ) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point_without_margin(&local_dir)
    }
}
