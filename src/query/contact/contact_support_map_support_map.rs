use crate::math::{Isometry, Point, Real, Vector};
use crate::query::gjk::{self, CsoPoint, GjkResult, VoronoiSimplex};
use crate::query::{Contact, PenetrationEstimator};
use crate::shape::SupportMap;

use na::Unit;

/// Contact between support-mapped shapes (`Cuboid`, `Triangle`, etc.)
///
/// If the shapes overlap, the penetration depth and axis are obtained from
/// `penetration`, when one is provided. Otherwise the contact degrades to a
/// zero-depth touch on a stable substitute axis so the caller still receives
/// a usable answer.
pub fn contact_support_map_support_map<G1: ?Sized, G2: ?Sized>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    prediction: Real,
) -> Option<Contact>
where
    G1: SupportMap,
    G2: SupportMap,
{
    contact_support_map_support_map_with_params(
        pos12,
        g1,
        g2,
        prediction,
        &mut VoronoiSimplex::new(),
        None,
        None,
    )
}

/// Contact between support-mapped shapes, with finer-grained control of the
/// underlying GJK execution.
///
/// The `init_dir` is the axis along which the first support point is taken;
/// passing the separation axis of the previous simulation step warm-starts
/// the query.
pub fn contact_support_map_support_map_with_params<G1: ?Sized, G2: ?Sized>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    prediction: Real,
    simplex: &mut VoronoiSimplex,
    init_dir: Option<Unit<Vector<Real>>>,
    penetration: Option<&dyn PenetrationEstimator>,
) -> Option<Contact>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let dir = if let Some(init_dir) = init_dir {
        init_dir
    } else if let Some(init_dir) =
        Unit::try_new(pos12.translation.vector, crate::math::DEFAULT_EPSILON)
    {
        init_dir
    } else {
        Vector::x_axis()
    };

    simplex.reset(CsoPoint::from_shapes(pos12, g1, g2, &dir));

    match gjk::closest_points(pos12, g1, g2, prediction, simplex) {
        GjkResult::ClosestPoints(point1, point2_1, normal1) => {
            let dist = (point2_1 - point1).dot(&normal1);
            let point2 = pos12.inverse_transform_point(&point2_1);
            let normal2 = pos12.inverse_transform_unit_vector(&-normal1);
            Some(Contact::new(point1, point2, normal1, normal2, dist))
        }
        GjkResult::NoIntersection(_) => None,
        GjkResult::Intersection => {
            deep_contact(pos12, g1, g2, penetration)
        }
    }
}

// The shapes overlap: ask the penetration estimator for a depth and an axis.
fn deep_contact<G1: ?Sized, G2: ?Sized>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    penetration: Option<&dyn PenetrationEstimator>,
) -> Option<Contact>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let (dist, normal1) = match penetration.and_then(|p| {
        p.estimate_conservative_separation(pos12, &SupportMapRef(g1), &SupportMapRef(g2))
    }) {
        Some(separation) => separation,
        None => {
            log::debug!(
                "No penetration estimate available for overlapping shapes, \
                 emitting a zero-depth contact on a substitute axis."
            );
            (0.0, Vector::x_axis())
        }
    };

    let point1 = g1.local_support_point_toward(&normal1);
    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);
    let point2 = g2.local_support_point_toward(&normal2);

    Some(Contact::new(point1, point2, normal1, normal2, dist))
}

// Sized adapter so unsized support maps can be handed to the estimator's
// trait-object interface.
struct SupportMapRef<'a, G: ?Sized>(&'a G);

impl<G: ?Sized + SupportMap> SupportMap for SupportMapRef<'_, G> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.0.local_support_point(dir)
    }

    #[inline]
    fn local_support_point_without_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        self.0.local_support_point_without_margin(dir)
    }
}
