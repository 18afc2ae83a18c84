//! Ray-casting related definitions and implementations.

pub use self::ray::{Ray, RayCast, RayIntersection};
pub use self::ray_ball::ray_toi_with_ball;
pub use self::ray_halfspace::{line_toi_with_halfspace, ray_toi_with_halfspace};
pub use self::ray_support_map::local_ray_intersection_with_support_map_with_params;

mod ray;
mod ray_aabb;
mod ray_ball;
mod ray_halfspace;
mod ray_support_map;
