//! Closest-points computation.

pub use self::closest_points::ClosestPoints;
pub use self::closest_points_segment_segment::{
    closest_points_segment_segment, closest_points_segment_segment_with_locations,
    closest_points_segment_segment_with_locations_nD,
};

mod closest_points;
mod closest_points_segment_segment;
