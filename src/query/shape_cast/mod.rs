//! Time-of-impact computation between moving shapes.

pub use self::shape_cast::{cast_shapes, ShapeCastHit, ShapeCastOptions, ShapeCastStatus};
pub use self::shape_cast_support_map_support_map::cast_shapes_support_map_support_map;

mod shape_cast;
mod shape_cast_support_map_support_map;
