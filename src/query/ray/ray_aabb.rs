use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::FeatureId;
use na;

impl Aabb {
    /// Computes the parameters of the two intersection points between a line
    /// and this AABB.
    ///
    /// The parameters are such that the points are
    /// `line_origin + line_dir * t` with `t` one of the returned values.
    /// Returns `None` if the line misses the box.
    pub fn clip_line_parameters(
        &self,
        line_origin: &Point<Real>,
        line_dir: &Vector<Real>,
    ) -> Option<(Real, Real)> {
        let mut tmin: Real = -Real::MAX;
        let mut tmax: Real = Real::MAX;

        for i in 0..DIM {
            if line_dir[i] == 0.0 {
                // The line is parallel to this slab.
                if line_origin[i] < self.mins[i] || line_origin[i] > self.maxs[i] {
                    return None;
                }
            } else {
                let inv_d = 1.0 / line_dir[i];
                let mut t1 = (self.mins[i] - line_origin[i]) * inv_d;
                let mut t2 = (self.maxs[i] - line_origin[i]) * inv_d;

                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }

                tmin = tmin.max(t1);
                tmax = tmax.min(t2);

                if tmin > tmax {
                    return None;
                }
            }
        }

        Some((tmin, tmax))
    }
}

impl RayCast for Aabb {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        let (tmin, tmax) = self.clip_line_parameters(&ray.origin, &ray.dir)?;

        if tmax < 0.0 || tmin > max_time_of_impact {
            return None;
        }

        if tmin < 0.0 {
            // The ray starts inside of the box.
            if solid {
                return Some(RayIntersection::new(0.0, na::zero(), FeatureId::Unknown));
            } else if tmax <= max_time_of_impact {
                return Some(RayIntersection::new(
                    tmax,
                    aabb_normal_at(self, ray, tmax),
                    FeatureId::Unknown,
                ));
            } else {
                return None;
            }
        }

        Some(RayIntersection::new(
            tmin,
            aabb_normal_at(self, ray, tmin),
            FeatureId::Unknown,
        ))
    }
}

// The outward axis-aligned normal of the AABB face hit at the parameter `t`.
fn aabb_normal_at(aabb: &Aabb, ray: &Ray, t: Real) -> Vector<Real> {
    let pt = ray.point_at(t);
    let mut best_axis = 0;
    let mut best_sign = 1.0;
    let mut best_dist = Real::MAX;

    for i in 0..DIM {
        let dist_to_min = (pt[i] - aabb.mins[i]).abs();
        let dist_to_max = (pt[i] - aabb.maxs[i]).abs();

        if dist_to_min < best_dist {
            best_axis = i;
            best_sign = -1.0;
            best_dist = dist_to_min;
        }

        if dist_to_max < best_dist {
            best_axis = i;
            best_sign = 1.0;
            best_dist = dist_to_max;
        }
    }

    let mut normal = Vector::zeros();
    normal[best_axis] = best_sign;
    normal
}
