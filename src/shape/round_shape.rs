use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;
use na::Unit;

/// A shape dilated by a collision margin.
///
/// The margin (`border_radius`) inflates the inner shape's surface outward
/// by a constant distance, rounding its corners. Support queries on the
/// dilated surface are answered by [`SupportMap::local_support_point`] while
/// [`SupportMap::local_support_point_without_margin`] exposes the inner
/// shape's core surface, which is what distance algorithms operate on before
/// margins are re-applied to the result.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub struct RoundShape<S> {
    /// The shape being dilated.
    pub inner_shape: S,
    /// The radius of the dilation.
    pub border_radius: Real,
}

impl<S: SupportMap> SupportMap for RoundShape<S> {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.local_support_point_toward(&Unit::new_normalize(*dir))
    }

    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.inner_shape.local_support_point_toward(dir) + **dir * self.border_radius
    }

    fn local_support_point_without_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        self.inner_shape.local_support_point_without_margin(dir)
    }
}

/// A borrowed version of [`RoundShape`], to dilate a shape without moving it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct RoundShapeRef<'a, S: ?Sized> {
    /// The shape being dilated.
    pub inner_shape: &'a S,
    /// The radius of the dilation.
    pub border_radius: Real,
}

impl<S: ?Sized + SupportMap> SupportMap for RoundShapeRef<'_, S> {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.local_support_point_toward(&Unit::new_normalize(*dir))
    }

    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.inner_shape.local_support_point_toward(dir) + **dir * self.border_radius
    }

    fn local_support_point_without_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        self.inner_shape.local_support_point_without_margin(dir)
    }
}
