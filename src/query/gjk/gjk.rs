//! The Gilbert-Johnson-Keerthi distance algorithm.
//!
//! GJK operates on the Minkowski difference (also called Configuration Space
//! Obstacle, or CSO) of two convex shapes: it iteratively grows a simplex
//! inside the CSO, driving it toward the point of the CSO closest to the
//! origin. If the origin ends up inside the simplex the shapes overlap;
//! otherwise the projection of the origin on the simplex yields the
//! separation distance and one closest point on each shape.
//!
//! Only the support mapping of the shapes is needed, so the same loop serves
//! any convex shape. Two derived operations reuse it: [`cast_local_ray`]
//! (ray-casting a single convex shape) and [`directional_distance`]
//! (a linear sweep of one shape toward another).

use na::{ComplexField, Unit};

use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::query::gjk::{ConstantOrigin, CsoPoint, VoronoiSimplex};
use crate::query::{self, Ray};
use crate::shape::SupportMap;

use num::Bounded;

/// Results of the GJK algorithm.
///
/// Every point and vector carried by this enum is expressed in the
/// local-space of the first shape.
#[derive(Clone, Debug, PartialEq)]
pub enum GjkResult {
    /// The two shapes are overlapping: the origin lies inside the Minkowski
    /// difference. GJK cannot compute a penetration depth; a penetration
    /// estimator must be consulted when one is needed.
    Intersection,
    /// The shapes are separated.
    ///
    /// Carries the closest point on the first shape, the closest point on
    /// the second shape (also expressed in the local-space of the first
    /// shape), and the unit separation axis pointing from the first shape
    /// toward the second.
    ClosestPoints(Point<Real>, Point<Real>, Unit<Vector<Real>>),
    /// The shapes are farther apart than the maximum distance given to the
    /// query. Carries the best known separation axis.
    NoIntersection(Unit<Vector<Real>>),
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = crate::math::DEFAULT_EPSILON;
    _eps * 10.0
}

/// Projects the origin on the boundary of the given shape.
///
/// The origin is assumed to be outside of the shape. If it is inside, `None`
/// is returned.
pub fn project_origin<G: ?Sized + SupportMap>(
    m: &Isometry<Real>,
    g: &G,
    simplex: &mut VoronoiSimplex,
) -> Option<Point<Real>> {
    let m_inv = m.inverse();
    let dir = Unit::try_new(-m.translation.vector, crate::math::DEFAULT_EPSILON)
        .unwrap_or(Vector::x_axis());
    simplex.reset(CsoPoint::from_shapes_toward(&m_inv, g, &ConstantOrigin, &dir));

    match closest_points(&m_inv, g, &ConstantOrigin, Real::max_value(), simplex) {
        GjkResult::Intersection => None,
        GjkResult::ClosestPoints(p, _, _) => Some(p),
        _ => unreachable!(),
    }
}

/*
 * Separating Axis GJK
 */
/// Computes the closest points between two convex shapes.
///
/// The simplex must be initialized (with [`VoronoiSimplex::reset`]) with at
/// least one support point of the Minkowski difference before this is
/// called; reusing the simplex of the previous step of a simulation warm
/// starts the query.
///
/// The loop terminates:
/// - with `GjkResult::Intersection` as soon as the origin is found to lie on
///   or inside the simplex;
/// - with `GjkResult::NoIntersection` as soon as the shapes are proven to be
///   farther apart than `max_dist`;
/// - with `GjkResult::ClosestPoints` when the gap between the upper and
///   lower distance bounds falls below a tolerance *relative* to the current
///   distance, so convergence does not depend on the absolute scale of the
///   shapes.
///
/// A hard iteration cap guards against cycling caused by floating-point
/// noise; reaching it resolves to the best separated answer found so far
/// rather than an error, since callers must always receive a usable result.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    max_dist: Real,
    simplex: &mut VoronoiSimplex,
) -> GjkResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps = crate::math::DEFAULT_EPSILON;
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = ComplexField::sqrt(_eps_tol);

    let mut proj = simplex.project_origin_and_reduce();

    let mut old_dir;

    if let Some(proj_dir) = Unit::try_new(proj.coords, 0.0) {
        old_dir = -proj_dir;
    } else {
        return GjkResult::Intersection;
    }

    let mut max_bound = Real::max_value();
    let mut dir;
    let mut niter = 0;

    loop {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            // The origin is on the simplex.
            return GjkResult::Intersection;
        }

        if max_bound >= old_max_bound {
            // Upper bounds inconsistencies: the previous iteration's answer
            // was better, return it.
            let (p1, p2) = result(simplex, true);
            return GjkResult::ClosestPoints(p1, p2, old_dir);
        }

        let cso_point = CsoPoint::from_shapes(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        assert!(min_bound.is_finite());

        if min_bound > max_dist {
            return GjkResult::NoIntersection(dir);
        } else if max_bound - min_bound <= _eps_rel * max_bound {
            // The distance found has a good enough precision.
            let (p1, p2) = result(simplex, false);
            return GjkResult::ClosestPoints(p1, p2, dir);
        }

        if !simplex.add_point(cso_point) {
            // The new support point makes no meaningful progress.
            let (p1, p2) = result(simplex, false);
            return GjkResult::ClosestPoints(p1, p2, dir);
        }

        old_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= _eps_tol {
                let (p1, p2) = result(simplex, true);
                return GjkResult::ClosestPoints(p1, p2, old_dir);
            } else {
                // Point inside of the CSO.
                return GjkResult::Intersection;
            }
        }

        niter += 1;

        if niter == 100 {
            log::debug!("GJK did not converge after 100 iterations, returning the best-effort separated result.");
            let (p1, p2) = result(simplex, false);
            return GjkResult::ClosestPoints(p1, p2, dir);
        }
    }
}

/// Casts a ray against a shape described by its support mapping.
///
/// The ray is expressed in the local-space of the shape. Returns the time of
/// impact and the surface normal at the hit point, or `None` when the ray
/// misses the shape within `max_time_of_impact`.
pub fn cast_local_ray<G: ?Sized + SupportMap>(
    shape: &G,
    simplex: &mut VoronoiSimplex,
    ray: &Ray,
    max_time_of_impact: Real,
) -> Option<(Real, Vector<Real>)> {
    let g2 = ConstantOrigin;
    minkowski_ray_cast(
        &Isometry::identity(),
        shape,
        &g2,
        ray,
        max_time_of_impact,
        simplex,
    )
}

/// Computes how far a shape can translate along `dir` before touching
/// another shape.
///
/// Returns the travelled distance, the normal at the first contact, and the
/// witness points on both shapes at the time of contact, all expressed in
/// the local-space of the first shape. Returns `None` when no contact ever
/// happens along this direction.
///
/// If the shapes are already overlapping, the returned distance is `0.0` and
/// the witness points are undefined (set to the origin).
pub fn directional_distance<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    dir: &Vector<Real>,
    simplex: &mut VoronoiSimplex,
) -> Option<(Real, Vector<Real>, Point<Real>, Point<Real>)>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let ray = Ray::new(Point::origin(), *dir);
    minkowski_ray_cast(pos12, g1, g2, &ray, Real::max_value(), simplex).map(
        |(time_of_impact, normal)| {
            let witnesses = if time_of_impact != 0.0 {
                result(simplex, simplex.dimension() == DIM)
            } else {
                // If there is a penetration, the witness points are undefined.
                (Point::origin(), Point::origin())
            };

            (time_of_impact, normal, witnesses.0, witnesses.1)
        },
    )
}

// Ray-cast on the Minkowski Difference `g1 - pos12 * g2`.
fn minkowski_ray_cast<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    ray: &Ray,
    max_time_of_impact: Real,
    simplex: &mut VoronoiSimplex,
) -> Option<(Real, Vector<Real>)>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps = crate::math::DEFAULT_EPSILON;
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = ComplexField::sqrt(_eps_tol);

    let ray_length = ray.dir.norm();

    if relative_eq!(ray_length, 0.0) {
        return None;
    }

    let mut ltoi = 0.0;
    let mut curr_ray = Ray::new(ray.origin, ray.dir / ray_length);
    let dir = -curr_ray.dir;
    let mut ldir = dir;

    // Initialize the simplex.
    let support_point = CsoPoint::from_shapes(pos12, g1, g2, &dir);
    simplex.reset(support_point.translate(&-curr_ray.origin.coords));

    let mut proj = simplex.project_origin_and_reduce();
    let mut max_bound = Real::max_value();
    let mut dir;
    let mut niter = 0;
    let mut last_chance = false;

    loop {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            return Some((ltoi / ray_length, ldir));
        }

        let support_point = if max_bound >= old_max_bound {
            // Upper bounds inconsistencies. Consider the projection as a valid support point.
            last_chance = true;
            CsoPoint::single_point(proj + curr_ray.origin.coords)
        } else {
            CsoPoint::from_shapes(pos12, g1, g2, &dir)
        };

        if last_chance && ltoi > 0.0 {
            return Some((ltoi / ray_length, ldir));
        }

        // Clip the ray on the support halfspace (None <=> t < 0)
        // The configurations are:
        //   dir.dot(curr_ray.dir)  |   t   |               Action
        // −−−−−−−−−−−−−−−−−−−−-----+−−−−−−−+−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−
        //          < 0             |  < 0  | Continue.
        //          < 0             |  > 0  | New lower bound, move the origin.
        //          > 0             |  < 0  | Miss. No intersection.
        //          > 0             |  > 0  | New higher bound.
        match query::details::ray_toi_with_halfspace(&support_point.point, &dir, &curr_ray) {
            Some(t) => {
                if dir.dot(&curr_ray.dir) < 0.0 && t > 0.0 {
                    // New lower bound.
                    ldir = *dir;
                    ltoi += t;

                    // NOTE: we divide by ray_length instead of doing
                    // max_time_of_impact * ray_length to avoid an overflow
                    // when max_time_of_impact is Real::max_value().
                    if ltoi / ray_length > max_time_of_impact {
                        return None;
                    }

                    let shift = curr_ray.dir * t;
                    curr_ray.origin += shift;
                    max_bound = Real::max_value();
                    simplex.modify_pnts(&|pt| pt.translate_mut(&-shift));
                    last_chance = false;
                }
            }
            None => {
                if dir.dot(&curr_ray.dir) > _eps_tol {
                    // Miss.
                    return None;
                }
            }
        }

        if last_chance {
            return None;
        }

        let min_bound = -dir.dot(&(support_point.point.coords - curr_ray.origin.coords));

        assert!(min_bound.is_finite());

        if max_bound - min_bound <= _eps_rel * max_bound {
            return None;
        }

        let _ = simplex.add_point(support_point.translate(&-curr_ray.origin.coords));
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= _eps_tol {
                return None;
            } else {
                // Point inside of the CSO.
                return Some((ltoi / ray_length, ldir));
            }
        }

        niter += 1;
        if niter == 100 {
            log::debug!("GJK ray-cast did not converge after 100 iterations.");
            return None;
        }
    }
}

fn result(simplex: &VoronoiSimplex, prev: bool) -> (Point<Real>, Point<Real>) {
    let mut res = (Point::origin(), Point::origin());
    if prev {
        for i in 0..simplex.prev_dimension() + 1 {
            let coord = simplex.prev_proj_coord(i);
            let point = simplex.prev_point(i);
            res.0 += point.orig1.coords * coord;
            res.1 += point.orig2.coords * coord;
        }

        res
    } else {
        for i in 0..simplex.dimension() + 1 {
            let coord = simplex.proj_coord(i);
            let point = simplex.point(i);
            res.0 += point.orig1.coords * coord;
            res.1 += point.orig2.coords * coord;
        }

        res
    }
}
