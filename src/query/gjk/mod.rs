//! The GJK distance algorithm and its simplex machinery.

pub use self::cso_point::CsoPoint;
pub use self::gjk::{
    cast_local_ray, closest_points, directional_distance, eps_tol, project_origin, GjkResult,
};
pub use self::special_support_maps::ConstantOrigin;
pub use self::voronoi_simplex::VoronoiSimplex;

mod cso_point;
mod gjk;
mod special_support_maps;
mod voronoi_simplex;
