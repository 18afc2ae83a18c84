//! Non-persistent and persistent geometric queries.
//!
//! The most general entry points provided by this module are:
//!
//! * [`query::contact()`](contact()) to compute one pair of contact points
//!   between two support-mapped shapes, including penetrating contact.
//! * [`query::cast_shapes()`](cast_shapes) to determine when two shapes
//!   undergoing translational motions hit for the first time.
//! * [`contact_manifold_primitive_primitive`] to compute a full, persistent
//!   contact manifold between two primitives.
//!
//! Ray-casting and point-projection can be achieved by importing traits:
//!
//! * [`RayCast`] for ray-casting.
//! * [`PointQuery`] for point projection.
//!
//! The functions exported by the `details` submodule are more specific
//! versions of the ones described above, dedicated to a particular pair of
//! shapes or to a trait implemented by the supported shapes.

pub use self::closest_points::ClosestPoints;
pub use self::contact::{contact, Contact};
pub use self::contact_manifolds::{
    contact_manifold_primitive_primitive, ContactManifold, TrackedContact, TriangleTriangleState,
};
pub use self::error::QueryError;
pub use self::penetration::PenetrationEstimator;
pub use self::point::{PointProjection, PointQuery, PointQueryWithLocation};
pub use self::ray::{Ray, RayCast, RayIntersection};
pub use self::shape_cast::{cast_shapes, ShapeCastHit, ShapeCastOptions, ShapeCastStatus};

mod closest_points;
mod contact;
mod contact_manifolds;
mod error;
pub mod gjk;
mod penetration;
pub mod point;
mod ray;
mod shape_cast;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::closest_points::{
        closest_points_segment_segment, closest_points_segment_segment_with_locations,
        closest_points_segment_segment_with_locations_nD,
    };
    pub use super::contact::{
        contact_ball_ball, contact_support_map_support_map,
        contact_support_map_support_map_with_params,
    };
    pub use super::contact_manifolds::{
        contact_manifold_ball_ball, contact_manifold_convex_convex,
        contact_manifold_triangle_triangle,
    };
    pub use super::ray::{
        line_toi_with_halfspace, local_ray_intersection_with_support_map_with_params,
        ray_toi_with_ball, ray_toi_with_halfspace,
    };
    pub use super::shape_cast::cast_shapes_support_map_support_map;
}
