use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::shape::SupportMap;
use na;

/// Computes the AABB of a support mapped shape.
pub fn support_map_aabb<G>(m: &Isometry<Real>, i: &G) -> Aabb
where
    G: SupportMap,
{
    let mut min = na::zero::<Vector<Real>>();
    let mut max = na::zero::<Vector<Real>>();
    let mut basis = na::zero::<Vector<Real>>();

    for d in 0..DIM {
        basis[d] = 1.0;
        max[d] = i.support_point(m, &basis)[d];

        basis[d] = -1.0;
        min[d] = i.support_point(m, &basis)[d];

        basis[d] = 0.0;
    }

    Aabb::new(Point::from(min), Point::from(max))
}

/// Computes the AABB of a support mapped shape in its local-space.
pub fn local_support_map_aabb<G>(i: &G) -> Aabb
where
    G: SupportMap,
{
    let mut min = na::zero::<Vector<Real>>();
    let mut max = na::zero::<Vector<Real>>();
    let mut basis = na::zero::<Vector<Real>>();

    for d in 0..DIM {
        basis[d] = 1.0;
        max[d] = i.local_support_point(&basis)[d];

        basis[d] = -1.0;
        min[d] = i.local_support_point(&basis)[d];

        basis[d] = 0.0;
    }

    Aabb::new(Point::from(min), Point::from(max))
}
