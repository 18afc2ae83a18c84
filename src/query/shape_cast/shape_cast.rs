use crate::math::{Isometry, Point, Real, Vector};
use crate::query::details::cast_shapes_support_map_support_map;
use crate::shape::SupportMap;
use na::Unit;

/// The status of the linear shape-cast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ShapeCastStatus {
    /// The shape-casting algorithm ran out of iterations before achieving
    /// convergence.
    ///
    /// The content of the hit will still be a conservative approximation of
    /// the actual result so it is often fine to interpret this case as a
    /// success.
    OutOfIterations,
    /// The shape-casting algorithm converged successfully.
    Converged,
    /// The shapes were already penetrating, or closer than the target
    /// distance, at the time 0.
    PenetratingOrWithinTargetDist,
}

/// The result of a linear shape-cast.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ShapeCastHit {
    /// The time at which the shapes touch, in units of the relative linear
    /// velocity given to the query.
    pub time_of_impact: Real,
    /// The contact point at the time of impact, on the first shape, in its
    /// local-space.
    pub witness1: Point<Real>,
    /// The contact point at the time of impact, on the second shape, in its
    /// local-space.
    pub witness2: Point<Real>,
    /// The contact normal at the time of impact, in the local-space of the
    /// first shape.
    pub normal1: Unit<Vector<Real>>,
    /// The contact normal at the time of impact, in the local-space of the
    /// second shape.
    pub normal2: Unit<Vector<Real>>,
    /// The way the shape-cast algorithm terminated.
    pub status: ShapeCastStatus,
}

/// Configuration of a linear shape-cast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeCastOptions {
    /// The maximum time-of-impact to look for a hit. Anything beyond is
    /// reported as a miss.
    pub max_time_of_impact: Real,
    /// The shapes are considered touching as soon as their distance falls
    /// below this value.
    pub target_distance: Real,
    /// If `false`, and the shapes are already penetrating at the time 0,
    /// the cast reports a hit only when the motion would make the
    /// penetration worse.
    pub stop_at_penetration: bool,
    /// If `true`, witness points and normals are computed even when the
    /// shapes penetrate at the time 0.
    pub compute_impact_geometry_on_penetration: bool,
}

impl ShapeCastOptions {
    /// Options for a shape-cast stopping at the given maximum time of impact.
    pub fn with_max_time_of_impact(max_time_of_impact: Real) -> Self {
        Self {
            max_time_of_impact,
            ..Default::default()
        }
    }
}

impl Default for ShapeCastOptions {
    fn default() -> Self {
        Self {
            max_time_of_impact: Real::MAX,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        }
    }
}

/// Computes when two moving shapes will touch for the first time.
///
/// `vel12` is the relative linear velocity of the second shape with regard
/// to the first one, expressed in the local-space of the first shape.
pub fn cast_shapes<G1: ?Sized, G2: ?Sized>(
    pos1: &Isometry<Real>,
    vel1: &Vector<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    vel2: &Vector<Real>,
    g2: &G2,
    options: ShapeCastOptions,
) -> Option<ShapeCastHit>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let pos12 = pos1.inv_mul(pos2);
    let vel12 = pos1.inverse_transform_vector(&(vel2 - vel1));
    cast_shapes_support_map_support_map(&pos12, &vel12, g1, g2, options)
}
