use crate::math::{Isometry, Real};
use crate::query::contact_manifolds::{
    contact_manifold_ball_ball, contact_manifold_convex_convex,
    contact_manifold_triangle_triangle, TriangleTriangleState,
};
use crate::query::{ContactManifold, PenetrationEstimator, QueryError};
use crate::shape::{Primitive, TriangleFlags};

/// Computes the contact manifold between two primitives, selecting the
/// pair-specific generator from their kinds.
///
/// `flags1`/`flags2` only affect triangles; pass [`TriangleFlags::empty()`]
/// for other primitives. The `estimator` is consulted for penetration depths
/// when the pair falls back to the generic convex-convex generator and the
/// shapes overlap; `state` carries the triangle-triangle generator's
/// cross-step tie-break memory.
pub fn contact_manifold_primitive_primitive<ManifoldData, ContactData>(
    pos12: &Isometry<Real>,
    shape1: &Primitive,
    flags1: TriangleFlags,
    shape2: &Primitive,
    flags2: TriangleFlags,
    prediction: Real,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
    estimator: Option<&dyn PenetrationEstimator>,
    state: &mut TriangleTriangleState,
) -> Result<(), QueryError>
where
    ContactData: Default + Copy,
{
    match (shape1, shape2) {
        (Primitive::Ball(ball1), Primitive::Ball(ball2)) => {
            contact_manifold_ball_ball(pos12, ball1, ball2, prediction, manifold)
        }
        (Primitive::Triangle(triangle1), Primitive::Triangle(triangle2)) => {
            contact_manifold_triangle_triangle(
                pos12, triangle1, flags1, triangle2, flags2, prediction, manifold, state,
            )
        }
        (shape1, shape2) => contact_manifold_convex_convex(
            pos12,
            shape1.as_support_map(),
            shape2.as_support_map(),
            prediction,
            manifold,
            estimator,
        ),
    }
}
