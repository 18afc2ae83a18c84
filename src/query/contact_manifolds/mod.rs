//! Persistent contact-manifold computation.

pub use self::contact_manifold::{ContactManifold, TrackedContact};
pub use self::contact_manifolds_ball_ball::contact_manifold_ball_ball;
pub use self::contact_manifolds_convex_convex::contact_manifold_convex_convex;
pub use self::contact_manifolds_dispatch::contact_manifold_primitive_primitive;
pub use self::contact_manifolds_triangle_triangle::{
    contact_manifold_triangle_triangle, TriangleTriangleState,
};

mod contact_manifold;
mod contact_manifolds_ball_ball;
mod contact_manifolds_convex_convex;
mod contact_manifolds_dispatch;
mod contact_manifolds_triangle_triangle;
