use crate::math::{Isometry, Point, Real, Vector};
use crate::query::{ContactManifold, QueryError, TrackedContact};
use crate::shape::{Ball, PackedFeatureId};
use na::Unit;

/// Computes the contact manifold between two balls.
pub fn contact_manifold_ball_ball<ManifoldData, ContactData>(
    pos12: &Isometry<Real>,
    ball1: &Ball,
    ball2: &Ball,
    prediction: Real,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
) -> Result<(), QueryError>
where
    ContactData: Default + Copy,
{
    if prediction < 0.0 {
        return Err(QueryError::InvalidPrediction(prediction));
    }

    let old_points = manifold.points.clone();
    manifold.clear();

    let center2_1 = Point::from(pos12.translation.vector);
    let r1 = ball1.radius;
    let r2 = ball2.radius;
    let sum_radius = r1 + r2;

    let distance = center2_1.coords.norm();

    if distance - sum_radius > prediction {
        return Ok(());
    }

    let local_n1 = if distance >= crate::math::DEFAULT_EPSILON {
        Unit::new_unchecked(center2_1.coords / distance)
    } else {
        // The centers coincide: pick an arbitrary stable axis.
        Vector::x_axis()
    };
    let local_n2 = pos12.inverse_transform_unit_vector(&-local_n1);

    let contact = TrackedContact::new(
        Point::from(*local_n1 * r1),
        Point::from(*local_n2 * r2),
        PackedFeatureId::face(0),
        PackedFeatureId::face(0),
        distance - sum_radius,
    );

    manifold.points.push(contact);
    manifold.local_n1 = *local_n1;
    manifold.local_n2 = *local_n2;

    manifold.match_contacts(&old_points);
    Ok(())
}
