use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::query::{PointProjection, PointQuery};
use crate::shape::FeatureId;
use na;

impl Aabb {
    /// Computes the distance between the given point and this AABB.
    ///
    /// Returns `0.0` if the point is inside of the AABB.
    #[inline]
    pub fn distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        let proj = self.project_local_point(pt, true);

        if proj.is_inside {
            0.0
        } else {
            na::distance(pt, &proj.point)
        }
    }
}

impl PointQuery for Aabb {
    #[inline]
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection {
        let mins_pt = self.mins - pt;
        let pt_maxs = pt - self.maxs;
        let shift = mins_pt.sup(&na::zero()) - pt_maxs.sup(&na::zero());

        let inside = shift == Vector::zeros();

        if !inside {
            PointProjection::new(false, pt + shift)
        } else if solid {
            PointProjection::new(true, *pt)
        } else {
            // Project on the nearest face.
            let mut best_axis = 0;
            let mut best_shift = 0.0;
            let mut best_dist = Real::MAX;

            for i in 0..DIM {
                let dist_to_min = pt[i] - self.mins[i];
                let dist_to_max = self.maxs[i] - pt[i];

                if dist_to_min < best_dist {
                    best_axis = i;
                    best_dist = dist_to_min;
                    best_shift = -dist_to_min;
                }

                if dist_to_max < best_dist {
                    best_axis = i;
                    best_dist = dist_to_max;
                    best_shift = dist_to_max;
                }
            }

            let mut shift = Vector::zeros();
            shift[best_axis] = best_shift;

            PointProjection::new(true, pt + shift)
        }
    }

    #[inline]
    fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, FeatureId) {
        let proj = self.project_local_point(pt, false);
        (proj, FeatureId::Unknown)
    }
}
