//! Point inclusion and projection.

#[doc(inline)]
pub use self::point_query::{PointProjection, PointQuery, PointQueryWithLocation};

mod point_aabb;
mod point_query;
mod point_segment;
mod point_tetrahedron;
mod point_triangle;
