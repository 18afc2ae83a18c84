use crate::math::Real;
use thiserror::Error;

/// Error indicating that a geometric query was given invalid inputs.
///
/// Only true precondition violations surface as errors. Recoverable
/// numerical issues (non-convergence, degenerate directions, coincident
/// points) always resolve to a best-effort answer instead, because the
/// contact pipeline must hand the constraint solver a usable result every
/// step.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum QueryError {
    /// A contact query was given a negative prediction distance.
    ///
    /// The prediction (the sum of collision margins plus the extra contact
    /// activation distance) must always be non-negative; a negative value is
    /// rejected instead of being silently clamped.
    #[error("the contact prediction distance must be non-negative, found {0}")]
    InvalidPrediction(Real),
}
