use crate::math::Real;
use crate::query::gjk::{self, VoronoiSimplex};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{Cuboid, FeatureId, Segment, SupportMap, Triangle};

/// Casts a ray on a support-mapped shape using the GJK algorithm.
pub fn local_ray_intersection_with_support_map_with_params<G: ?Sized>(
    shape: &G,
    simplex: &mut VoronoiSimplex,
    ray: &Ray,
    max_time_of_impact: Real,
    solid: bool,
) -> Option<RayIntersection>
where
    G: SupportMap,
{
    let (time_of_impact, normal) = gjk::cast_local_ray(shape, simplex, ray, max_time_of_impact)?;

    if solid || time_of_impact != 0.0 {
        return Some(RayIntersection::new(
            time_of_impact,
            normal,
            FeatureId::Unknown,
        ));
    }

    // The ray is inside of the shape: cast the ray again, from the other
    // side, to find the exit point.
    let ndir = ray.dir.normalize();
    let supp = shape.local_support_point(&ndir);
    let shift = (supp - ray.origin).dot(&ndir) + 0.001;
    let new_ray = Ray::new(ray.origin + ndir * shift, -ray.dir);

    // The exit point must be before the entry of the reversed ray.
    let (time_of_impact2, normal2) = gjk::cast_local_ray(shape, simplex, &new_ray, shift + 0.0001)?;

    let time_of_impact = shift - time_of_impact2;
    if time_of_impact <= max_time_of_impact {
        Some(RayIntersection::new(
            time_of_impact,
            normal2,
            FeatureId::Unknown,
        ))
    } else {
        None
    }
}

impl RayCast for Cuboid {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        local_ray_intersection_with_support_map_with_params(
            self,
            &mut VoronoiSimplex::new(),
            ray,
            max_time_of_impact,
            solid,
        )
    }
}

impl RayCast for Triangle {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        local_ray_intersection_with_support_map_with_params(
            self,
            &mut VoronoiSimplex::new(),
            ray,
            max_time_of_impact,
            solid,
        )
    }
}

impl RayCast for Segment {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        local_ray_intersection_with_support_map_with_params(
            self,
            &mut VoronoiSimplex::new(),
            ray,
            max_time_of_impact,
            solid,
        )
    }
}
