use crate::math::{Isometry, Real};
use crate::query::contact::contact_support_map_support_map_with_params;
use crate::query::gjk::VoronoiSimplex;
use crate::query::{ContactManifold, PenetrationEstimator, QueryError, TrackedContact};
use crate::shape::{PackedFeatureId, SupportMap};
use na::Unit;

/// Computes the contact manifold between two convex shapes described by
/// their support mappings.
///
/// This produces at most one contact point per call; the persistence of the
/// manifold across steps (with [`ContactManifold::try_update_contacts`])
/// accumulates the contact patch over a few steps of a resting
/// configuration.
///
/// If the shapes are overlapping deeper than their margins, the penetration
/// `estimator` is consulted for the depth and axis.
pub fn contact_manifold_convex_convex<ManifoldData, ContactData, S1, S2>(
    pos12: &Isometry<Real>,
    g1: &S1,
    g2: &S2,
    prediction: Real,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
    estimator: Option<&dyn PenetrationEstimator>,
) -> Result<(), QueryError>
where
    S1: ?Sized + SupportMap,
    S2: ?Sized + SupportMap,
    ContactData: Default + Copy,
{
    if prediction < 0.0 {
        return Err(QueryError::InvalidPrediction(prediction));
    }

    // Small thresholds: anything higher introduces numeric drift that shows
    // up as bumps in rolling motions.
    if manifold.try_update_contacts_eps(pos12, crate::utils::COS_1_DEGREES, 1.0e-6) {
        return Ok(());
    }

    let init_dir = Unit::try_new(manifold.local_n1, crate::math::DEFAULT_EPSILON);
    let contact = contact_support_map_support_map_with_params(
        pos12,
        g1,
        g2,
        prediction,
        &mut VoronoiSimplex::new(),
        init_dir,
        estimator,
    );

    let old_points = manifold.points.clone();
    manifold.clear();

    match contact {
        Some(contact) => {
            manifold.local_n1 = *contact.normal1;
            manifold.local_n2 = *contact.normal2;

            let tracked = TrackedContact::new(
                contact.point1,
                contact.point2,
                PackedFeatureId::UNKNOWN,
                PackedFeatureId::UNKNOWN,
                contact.dist,
            );
            manifold.points.push(tracked);
        }
        None => {
            // Keep the previous normal as the warm-start direction of the
            // next query.
        }
    }

    // Transfer the data of matching contact pairs. Feature ids are unknown
    // here, so the matching uses positions.
    manifold.match_contacts_using_positions(&old_points, 1.0e-4);
    Ok(())
}
