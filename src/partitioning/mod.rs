//! Spatial partitioning tools.

pub use self::bvt::{Bvt, BvtError, BvtNode};

mod bvt;
mod bvt_queries;
#[cfg(test)]
mod bvt_tests;
