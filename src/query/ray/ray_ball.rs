use crate::math::{Point, Real};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{Ball, FeatureId};
use na::{self, ComplexField};

impl RayCast for Ball {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        ray_toi_and_normal_with_ball(&Point::origin(), self.radius, ray, solid).and_then(
            |(_, inter)| {
                if inter.time_of_impact <= max_time_of_impact {
                    Some(inter)
                } else {
                    None
                }
            },
        )
    }
}

/// Computes the time of impact of a ray on a ball centered at `center`.
///
/// The first returned boolean indicates if the ray started inside of the
/// ball.
pub fn ray_toi_with_ball(
    center: &Point<Real>,
    radius: Real,
    ray: &Ray,
    solid: bool,
) -> (bool, Option<Real>) {
    let dcenter = ray.origin - *center;

    let a = ray.dir.norm_squared();
    let b = dcenter.dot(&ray.dir);
    let c = dcenter.norm_squared() - radius * radius;

    // Ball and ray origin at the same point.
    if c > 0.0 && b > 0.0 {
        (false, None)
    } else {
        let delta = b * b - a * c;

        if delta < 0.0 {
            // No solution: the ray misses the ball.
            (false, None)
        } else {
            let t = (-b - ComplexField::sqrt(delta)) / a;

            if t <= 0.0 {
                // The ray starts inside of the ball.
                if solid {
                    (true, Some(0.0))
                } else {
                    (true, Some((-b + ComplexField::sqrt(delta)) / a))
                }
            } else {
                (false, Some(t))
            }
        }
    }
}

/// Computes the time of impact and normal of a ray on a ball centered at
/// `center`.
pub fn ray_toi_and_normal_with_ball(
    center: &Point<Real>,
    radius: Real,
    ray: &Ray,
    solid: bool,
) -> Option<(bool, RayIntersection)> {
    let (inside, inter) = ray_toi_with_ball(center, radius, ray, solid);

    inter.map(|n| {
        let pos = ray.origin + ray.dir * n - center;
        let normal = pos.try_normalize(crate::math::DEFAULT_EPSILON).unwrap_or(na::zero());

        (
            inside,
            RayIntersection::new(n, normal, FeatureId::Face(0)),
        )
    })
}
