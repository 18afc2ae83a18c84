//! Shapes supported by proxima.

pub use self::ball::Ball;
pub use self::cuboid::Cuboid;
pub use self::feature_id::{FeatureId, PackedFeatureId};
pub use self::half_space::HalfSpace;
pub use self::primitive::Primitive;
pub use self::round_shape::RoundShape;
pub use self::segment::{Segment, SegmentPointLocation};
#[doc(inline)]
pub use self::support_map::SupportMap;
pub use self::tetrahedron::{Tetrahedron, TetrahedronPointLocation};
pub use self::triangle::{Triangle, TriangleFlags, TrianglePointLocation};

/// A ball dilated by an extra collision margin. Identical to a bigger ball,
/// but the margin is excluded from margin-less support queries.
pub type RoundBall = RoundShape<Ball>;
/// A cuboid dilated by a collision margin (so it has round corners).
pub type RoundCuboid = RoundShape<Cuboid>;
/// A triangle dilated by a collision margin (so it has round corners).
pub type RoundTriangle = RoundShape<Triangle>;

pub(crate) use self::round_shape::RoundShapeRef;

mod ball;
mod cuboid;
mod feature_id;
mod half_space;
mod primitive;
mod round_shape;
mod segment;
mod support_map;
mod tetrahedron;
mod triangle;
