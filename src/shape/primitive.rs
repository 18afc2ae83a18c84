use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{Ball, Cuboid, Segment, SupportMap, Triangle};

/// The closed set of convex primitives contact generation knows about.
///
/// Pair-specific algorithms are selected by matching on the two primitive
/// kinds (see
/// [`contact_manifold_primitive_primitive`](crate::query::contact_manifold_primitive_primitive)),
/// so adding a new primitive is a compile-time visible change rather than a
/// runtime downcast.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A ball.
    Ball(Ball),
    /// A cuboid.
    Cuboid(Cuboid),
    /// A segment.
    Segment(Segment),
    /// A triangle.
    Triangle(Triangle),
}

impl Primitive {
    /// This primitive seen through its support-mapping capability.
    #[inline]
    pub fn as_support_map(&self) -> &dyn SupportMap {
        match self {
            Primitive::Ball(s) => s,
            Primitive::Cuboid(s) => s,
            Primitive::Segment(s) => s,
            Primitive::Triangle(s) => s,
        }
    }

    /// Returns the underlying ball, if this primitive is one.
    #[inline]
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Primitive::Ball(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the underlying triangle, if this primitive is one.
    #[inline]
    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            Primitive::Triangle(s) => Some(s),
            _ => None,
        }
    }

    /// Computes the local-space AABB of this primitive.
    pub fn local_aabb(&self) -> Aabb {
        match self {
            Primitive::Ball(s) => s.local_aabb(),
            Primitive::Cuboid(s) => s.local_aabb(),
            Primitive::Segment(s) => Aabb::from_points(&[s.a, s.b]),
            Primitive::Triangle(s) => s.local_aabb(),
        }
    }

    /// Computes the world-space AABB of this primitive, transformed by `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        match self {
            Primitive::Ball(s) => s.aabb(pos),
            Primitive::Cuboid(s) => s.aabb(pos),
            Primitive::Segment(s) => Aabb::from_points(&[pos * s.a, pos * s.b]),
            Primitive::Triangle(s) => s.aabb(pos),
        }
    }
}

impl SupportMap for Primitive {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.as_support_map().local_support_point(dir)
    }

    #[inline]
    fn local_support_point_without_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        self.as_support_map().local_support_point_without_margin(dir)
    }
}

impl From<Ball> for Primitive {
    fn from(shape: Ball) -> Self {
        Primitive::Ball(shape)
    }
}

impl From<Cuboid> for Primitive {
    fn from(shape: Cuboid) -> Self {
        Primitive::Cuboid(shape)
    }
}

impl From<Segment> for Primitive {
    fn from(shape: Segment) -> Self {
        Primitive::Segment(shape)
    }
}

impl From<Triangle> for Primitive {
    fn from(shape: Triangle) -> Self {
        Primitive::Triangle(shape)
    }
}
