//! Bounding volumes: AABBs, bounding spheres, and view frusta.

pub use self::aabb::Aabb;
pub use self::bounding_sphere::BoundingSphere;
pub use self::bounding_volume::BoundingVolume;
pub use self::frustum::Frustum;

/// Free functions computing the bounding volumes of specific shapes.
pub mod details {
    pub use super::aabb_ball::{ball_aabb, local_ball_aabb};
    pub use super::aabb_utils::{local_support_map_aabb, support_map_aabb};
}

mod aabb;
mod aabb_ball;
mod aabb_cuboid;
mod aabb_triangle;
mod aabb_utils;
mod bounding_sphere;
mod bounding_volume;
mod frustum;
