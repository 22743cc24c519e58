//! Error types for the geometric core.
//!
//! Hard failures (singular matrices, bad dimensions, resolving without a
//! camera) surface as errors and abort the current operation; they are never
//! retried. Degenerate numeric input (normalizing a zero-length vector) is
//! deliberately NOT an error and maps to a well-defined fallback value so the
//! render loop keeps running.

use thiserror::Error;

/// Failures of the math kernel.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// The relevant determinant is exactly zero.
    #[error("matrix is not invertible")]
    NotInvertible,

    /// The cofactor machinery only handles dimensions 1 through 4.
    #[error("dimension out of range: {0} (expected 0 <= n <= 4)")]
    DimensionOutOfRange(usize),

    /// Modulo with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,
}

/// Failures of the per-frame geometry resolution step.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// Resolution was invoked with no main camera set. This is a required
    /// external precondition, not something to default silently.
    #[error("no main camera set")]
    NoCamera,

    /// A mesh's triangle index list is not a multiple of 3.
    #[error("mesh index list length {len} is not a multiple of 3")]
    MalformedMesh { len: usize },
}
